//! Cross-module tests over the shipped configuration and levels
