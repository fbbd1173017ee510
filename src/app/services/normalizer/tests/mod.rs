//! Tests for the currency and timestamp normalizers
