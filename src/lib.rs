//! Sleep Diary - Morning and evening sleep questionnaires
//!
//! This crate implements a citizen-facing sleep diary: authorable bilingual
//! questionnaires with conditional follow-up questions, guided navigation,
//! cross-question validation of answers and derivation of the standard
//! sleep parameters (SOL, WASO, TIB, TST) from a morning diary.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
