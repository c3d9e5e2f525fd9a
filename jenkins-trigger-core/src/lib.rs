//! Jenkins Trigger Core
//!
//! Core types and abstractions for triggering and watching Jenkins builds.
//!
//! This crate contains:
//! - Domain types: builds, queue items, results and job parameters
//! - DTOs: the subset of the Jenkins JSON API the action reads
//! - Poll: the bounded fixed-interval poller used to wait on remote state

pub mod domain;
pub mod dto;
pub mod poll;
