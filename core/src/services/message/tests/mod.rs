//! Tests for the message service
