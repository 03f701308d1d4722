//! Edge case tests for jsym-symbols
