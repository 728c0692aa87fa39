//! Selection of the calls an interceptor applies to

use std::collections::HashSet;

/// Decides whether a call is tagged for an interceptor
pub trait Selector: Send + Sync {
    fn is_tagged(&self, name: &str) -> bool;
}

/// Tags every call
#[derive(Debug, Clone, Copy, Default)]
pub struct AllCalls;

impl Selector for AllCalls {
    fn is_tagged(&self, _name: &str) -> bool {
        true
    }
}

/// Tags an explicit list of call names
#[derive(Debug, Clone, Default)]
pub struct TagSet {
    names: HashSet<String>,
}

impl TagSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl Selector for TagSet {
    fn is_tagged(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl<F> Selector for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_tagged(&self, name: &str) -> bool {
        self(name)
    }
}
