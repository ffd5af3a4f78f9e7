// ABOUTME: Test helper modules shared across integration test binaries
// ABOUTME: Currently just the axum in-process request driver
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health
#![allow(dead_code)]

pub mod axum_test;
