use crate::error::CollectError;
use std::collections::HashSet;

/// One archive entry: a name used verbatim inside the bundle and the raw response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedPayload {
    name: String,
    body: Vec<u8>,
}

impl NamedPayload {
    pub fn new(name: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Append-only, insertion-ordered payloads with unique names.
#[derive(Debug, Clone, Default)]
pub struct PayloadSet {
    payloads: Vec<NamedPayload>,
    names: HashSet<String>,
}

impl PayloadSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, payload: NamedPayload) -> Result<(), CollectError> {
        if !self.names.insert(payload.name.clone()) {
            return Err(CollectError::DuplicateEntry(payload.name));
        }
        self.payloads.push(payload);
        Ok(())
    }

    pub fn extend(&mut self, payloads: impl IntoIterator<Item = NamedPayload>) -> Result<(), CollectError> {
        payloads.into_iter().try_for_each(|payload| self.push(payload))
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.payloads.iter().map(NamedPayload::name)
    }

    pub fn as_slice(&self) -> &[NamedPayload] {
        &self.payloads
    }
}
