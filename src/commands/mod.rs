//! Commands Module
//!
//! 번역 히스토리 명령 핸들러

pub mod translations;
