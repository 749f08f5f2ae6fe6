// ABOUTME: Module containing all assistant tool implementations organized by category.
// ABOUTME: Each submodule corresponds to a tool category registered at startup.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! # Tool Implementations
//!
//! This module contains all assistant tool implementations, organized by
//! category:
//!
//! - `knowledge_search` - Semantic retrieval over the meeting knowledge base

// Knowledge tools: search_knowledge
pub mod knowledge_search;

pub use knowledge_search::KnowledgeSearchTool;
