//! Ordered post-process pass chain
//!
//! Effects describe where they want to run with a [`PassRegistration`]; the
//! host applies registrations during initialization. Nothing registers itself.

use crate::{Error, Result};

/// Where a registered pass is placed relative to an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertAnchor {
    Before(String),
    After(String),
    /// Append to the end of the chain
    End,
}

/// Registration descriptor for a post-process pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassRegistration {
    /// Unique pass name
    pub name: String,
    /// Output slot base names, indexed by slot number
    pub outputs: Vec<String>,
    pub anchor: InsertAnchor,
}

/// Ordered list of post-process passes
#[derive(Debug, Default)]
pub struct PassChain {
    passes: Vec<PassRegistration>,
}

impl PassChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for fluent API
    pub fn builder() -> PassChainBuilder {
        PassChainBuilder::new()
    }

    /// Insert a pass at its anchor
    pub fn insert(&mut self, registration: PassRegistration) -> Result<()> {
        if self.position(&registration.name).is_some() {
            return Err(Error::Graph(format!(
                "Pass '{}' is already registered",
                registration.name
            )));
        }

        let index = match &registration.anchor {
            InsertAnchor::End => self.passes.len(),
            InsertAnchor::Before(anchor) => self.anchor_position(anchor)?,
            InsertAnchor::After(anchor) => self.anchor_position(anchor)? + 1,
        };

        log::info!(
            "Registered post-process pass '{}' at position {}",
            registration.name,
            index
        );
        self.passes.insert(index, registration);
        Ok(())
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.passes.iter().position(|p| p.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&PassRegistration> {
        self.passes.iter().find(|p| p.name == name)
    }

    /// Pass names in execution order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.passes.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    fn anchor_position(&self, anchor: &str) -> Result<usize> {
        self.position(anchor)
            .ok_or_else(|| Error::Graph(format!("Anchor pass '{}' not found", anchor)))
    }
}

/// Builder for PassChain
pub struct PassChainBuilder {
    registrations: Vec<PassRegistration>,
}

impl PassChainBuilder {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    /// Append a pass with the given outputs
    pub fn with_pass(mut self, name: &str, outputs: &[&str]) -> Self {
        self.registrations.push(PassRegistration {
            name: name.to_string(),
            outputs: outputs.iter().map(|o| o.to_string()).collect(),
            anchor: InsertAnchor::End,
        });
        self
    }

    /// Queue a registration with its own anchor
    pub fn with_registration(mut self, registration: PassRegistration) -> Self {
        self.registrations.push(registration);
        self
    }

    /// Build the chain, applying registrations in the order they were added
    pub fn build(self) -> Result<PassChain> {
        let mut chain = PassChain::new();
        for registration in self.registrations {
            chain.insert(registration)?;
        }
        Ok(chain)
    }
}

impl Default for PassChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_chain() -> PassChain {
        PassChain::builder()
            .with_pass("ForwardPass", &["ForwardColor", "ForwardDepth"])
            .with_pass("BlitScreenPass", &[])
            .build()
            .unwrap()
    }

    #[test]
    fn insert_before_anchor() {
        let mut chain = base_chain();
        chain
            .insert(PassRegistration {
                name: "Blur".into(),
                outputs: vec!["BlurMap".into()],
                anchor: InsertAnchor::Before("BlitScreenPass".into()),
            })
            .unwrap();
        let names: Vec<_> = chain.names().collect();
        assert_eq!(names, ["ForwardPass", "Blur", "BlitScreenPass"]);
    }

    #[test]
    fn insert_after_anchor() {
        let mut chain = base_chain();
        chain
            .insert(PassRegistration {
                name: "Outline".into(),
                outputs: vec![],
                anchor: InsertAnchor::After("ForwardPass".into()),
            })
            .unwrap();
        assert_eq!(chain.position("Outline"), Some(1));
    }

    #[test]
    fn missing_anchor_is_an_error() {
        let mut chain = base_chain();
        let err = chain.insert(PassRegistration {
            name: "Blur".into(),
            outputs: vec![],
            anchor: InsertAnchor::Before("Tonemap".into()),
        });
        assert!(matches!(err, Err(Error::Graph(_))));
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut chain = base_chain();
        let err = chain.insert(PassRegistration {
            name: "ForwardPass".into(),
            outputs: vec![],
            anchor: InsertAnchor::End,
        });
        assert!(err.is_err());
    }
}
