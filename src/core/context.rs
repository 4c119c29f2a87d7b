//! Per-thread nested logging context
//!
//! This module provides:
//! - `FieldValue`: structured values carried by records and scopes
//! - a thread-local scope stack with strict LIFO `push`/`pop`
//! - `ScopeGuard`: RAII release of a scope on every exit path
//! - `ContextState`: an explicit handle for carrying context (including
//!   the correlation id) into a spawned thread or task

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// Flattened key-value mapping attached to records and scopes
pub type FieldMap = HashMap<String, FieldValue>;

/// Opaque handle identifying one pushed scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeToken(u64);

struct ScopeStack {
    scopes: Vec<(u64, FieldMap)>,
    correlation_id: Option<String>,
    next_id: u64,
}

impl ScopeStack {
    const fn new() -> Self {
        Self {
            scopes: Vec::new(),
            correlation_id: None,
            next_id: 1,
        }
    }
}

thread_local! {
    static STACK: RefCell<ScopeStack> = const { RefCell::new(ScopeStack::new()) };
}

/// Push a scope onto the current thread's stack.
///
/// Prefer [`scope`] (or `Logger::bind`) for guaranteed release; the raw
/// token form exists for callers that manage lifetimes explicitly.
pub fn push_scope(fields: FieldMap) -> ScopeToken {
    STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        let id = stack.next_id;
        stack.next_id += 1;
        stack.scopes.push((id, fields));
        ScopeToken(id)
    })
}

/// Pop a scope. Fails with `ScopeMismatch` (and leaves the stack intact)
/// unless `token` identifies the innermost scope.
pub fn pop_scope(token: ScopeToken) -> Result<()> {
    STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        match stack.scopes.last() {
            Some((id, _)) if *id == token.0 => {
                stack.scopes.pop();
                Ok(())
            }
            _ => Err(LoggerError::ScopeMismatch),
        }
    })
}

/// Merge all active scopes, outer to inner; inner wins on key collision.
#[must_use]
pub fn snapshot() -> FieldMap {
    STACK.with(|stack| {
        let stack = stack.borrow();
        let mut merged = FieldMap::new();
        for (_, fields) in &stack.scopes {
            for (key, value) in fields {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged
    })
}

#[must_use]
pub fn correlation_id() -> Option<String> {
    STACK.with(|stack| stack.borrow().correlation_id.clone())
}

/// Replace the current thread's correlation id, returning the previous one.
pub fn set_correlation_id(id: Option<String>) -> Option<String> {
    STACK.with(|stack| std::mem::replace(&mut stack.borrow_mut().correlation_id, id))
}

/// Generate, install, and return a fresh correlation id.
pub fn new_correlation_id() -> String {
    let id = uuid::Uuid::new_v4().to_string();
    set_correlation_id(Some(id.clone()));
    id
}

/// Acquire a scope for the duration of the returned guard.
#[must_use]
pub fn scope(fields: FieldMap) -> ScopeGuard {
    ScopeGuard {
        token: push_scope(fields),
        saved_correlation: None,
        _not_send: PhantomData,
    }
}

/// RAII guard releasing one scope (and optionally restoring a previous
/// correlation id) when dropped, including during unwinding.
pub struct ScopeGuard {
    token: ScopeToken,
    saved_correlation: Option<Option<String>>,
    // scope stacks are thread-local; the guard must stay on its thread
    _not_send: PhantomData<*const ()>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        // a mismatch here means the caller popped manually; nothing to undo
        let _ = pop_scope(self.token);
        if let Some(previous) = self.saved_correlation.take() {
            set_correlation_id(previous);
        }
    }
}

/// Captured context for installation in a spawned unit of work.
///
/// The scope stack itself is never shared across threads; this handle
/// copies the flattened fields and correlation id so ancestry survives
/// scheduling onto a different thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextState {
    fields: FieldMap,
    correlation_id: Option<String>,
}

impl ContextState {
    /// Capture the current thread's merged scopes and correlation id.
    #[must_use]
    pub fn fork_for_task() -> Self {
        Self {
            fields: snapshot(),
            correlation_id: correlation_id(),
        }
    }

    /// Install the captured context in the current thread. The returned
    /// guard removes it (and restores the previous correlation id) on drop.
    #[must_use]
    pub fn install(self) -> ScopeGuard {
        let previous = set_correlation_id(self.correlation_id);
        ScopeGuard {
            token: push_scope(self.fields),
            saved_correlation: Some(previous),
            _not_send: PhantomData,
        }
    }

    #[must_use]
    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    #[must_use]
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }
}
