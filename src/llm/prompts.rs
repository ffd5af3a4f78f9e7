// ABOUTME: Persona prompt template, synthesized greeting, and fallback replies
// ABOUTME: Fixed product copy; only the model endpoint is deployment config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! Prompt construction and canned replies for the doctor chat.
//!
//! The persona prompt and fallback texts are deliberately hard-coded: they
//! are product copy reviewed with clinical staff, not deployment settings.
//! Every failure mode of the chat pipeline resolves to one of these texts so
//! the patient is never shown an empty reply.

use crate::models::Doctor;

/// Fallback reply when the inference call fails or returns non-success.
///
/// Returned with a success-shaped payload: a single failed call degrades to
/// this checklist, with no retry and no error surfaced to the patient.
pub const CONNECTIVITY_FALLBACK: &str = "I apologize, but I'm having trouble connecting right now. Here's what I recommend in the meantime:

1. Continue with your prescribed exercise routine as directed
2. Apply ice or heat therapy as previously recommended
3. Take any prescribed medications as scheduled
4. Monitor your symptoms and note any changes
5. Contact me again if symptoms worsen or if you have urgent concerns

Please try reaching out again in a few moments, and I'll be happy to provide more specific guidance.";

/// Fallback reply when the chat pipeline itself fails unexpectedly.
///
/// Differently worded from [`CONNECTIVITY_FALLBACK`] and returned with an
/// error status, but still a renderable reply.
pub const INTERNAL_ERROR_FALLBACK: &str = "I apologize for the technical difficulty. Here's some general guidance:

1. Continue with your current treatment plan as prescribed
2. Monitor your symptoms and keep a daily log
3. Maintain regular exercise within your comfort zone
4. Apply appropriate rest and recovery techniques
5. Contact your healthcare provider if you experience any concerning symptoms

Please try again shortly, and I'll provide more personalized assistance.";

/// Reply substituted when the model answers with no usable content
pub const EMPTY_RESPONSE_FALLBACK: &str =
    "I apologize, but I was unable to process your request. Please try again.";

/// Build the system instruction fixing the assistant's doctor persona
///
/// Mandates the output shape: an introductory sentence followed by a numbered
/// list of concise, actionable points, with a standing instruction to escalate
/// serious symptoms to urgent care.
#[must_use]
pub fn doctor_system_prompt(doctor: &Doctor) -> String {
    format!(
        "You are {name}, a {specialty} with {years} years of experience.

IMPORTANT FORMATTING INSTRUCTIONS:
- ALWAYS format your response with clear, actionable bullet points
- Use numbered lists (1., 2., 3., etc.) for step-by-step instructions
- Keep each point concise and specific
- Focus on practical, actionable advice
- Maintain a professional but empathetic tone

Respond professionally and empathetically to this patient's message. Provide helpful, medically-informed guidance while maintaining a caring tone. Always format your responses with clear bullet points or numbered lists for easy reading.

Example format:
I understand your concern about [issue]. Here's what I recommend:

1. [First specific action/advice]
2. [Second specific action/advice]
3. [Third specific action/advice]

Remember to always advise seeking immediate medical attention for serious symptoms.",
        name = doctor.name,
        specialty = doctor.specialty,
        years = doctor.years_experience,
    )
}

/// Build the greeting shown when a conversation has no history yet
///
/// The greeting is synthesized per request and never persisted.
#[must_use]
pub fn doctor_greeting(doctor: &Doctor) -> String {
    format!(
        "Hello! I'm {name}, your {specialty}. I'm here to help guide your rehabilitation journey. How are you feeling today?",
        name = doctor.name,
        specialty = doctor.specialty,
    )
}
