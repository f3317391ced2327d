//! Token accounting for a chat session.

use std::collections::BTreeMap;
use std::fmt;

use crate::TokenUsage;

/// Cumulative token usage, overall and per completion service.
#[derive(Debug, Clone, Default)]
pub struct TokenTracker {
    total: TokenUsage,
    by_service: BTreeMap<String, TokenUsage>,
    last: Option<TokenUsage>,
    calls: u64,
}

impl TokenTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the usage reported for one provider call.
    pub fn record(&mut self, service: &str, usage: TokenUsage) {
        add(&mut self.total, usage);
        add(self.by_service.entry(service.to_string()).or_default(), usage);
        self.last = Some(usage);
        self.calls += 1;
    }

    pub fn total(&self) -> TokenUsage {
        self.total
    }

    pub fn for_service(&self, service: &str) -> Option<TokenUsage> {
        self.by_service.get(service).copied()
    }

    /// Usage of the most recent call.
    pub fn last(&self) -> Option<TokenUsage> {
        self.last
    }

    pub fn call_count(&self) -> u64 {
        self.calls
    }
}

impl fmt::Display for TokenTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} calls, {} tokens ({} in / {} out)",
            self.calls,
            self.total.total_tokens(),
            self.total.input_tokens,
            self.total.output_tokens
        )
    }
}

fn add(into: &mut TokenUsage, usage: TokenUsage) {
    into.input_tokens = into.input_tokens.saturating_add(usage.input_tokens);
    into.output_tokens = into.output_tokens.saturating_add(usage.output_tokens);
}
