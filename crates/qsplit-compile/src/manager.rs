//! Pass manager for orchestrating document passes.

use tracing::{debug, info, instrument};

use qsplit_ir::CircuitDocument;

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::passes::{CrossPartitionRewrite, DocumentValidation, GreedyPartition};
use crate::property::PropertySet;

/// Manages and executes a sequence of passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes on the given document.
    #[instrument(skip(self, doc, properties))]
    pub fn run(&self, doc: &mut CircuitDocument, properties: &mut PropertySet) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on document with {} wires",
            self.passes.len(),
            doc.num_wires()
        );

        for pass in &self.passes {
            if pass.should_run(doc, properties) {
                debug!("Running pass: {}", pass.name());
                pass.run(doc, properties)?;
                debug!("Pass {} completed, gates: {}", pass.name(), doc.num_gates());
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!(
            "Pass manager completed, wires: {}, columns: {}",
            doc.num_wires(),
            doc.num_columns()
        );

        Ok(())
    }

    /// Names of the passes, in order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for the distribution pipeline.
pub struct PassManagerBuilder {
    /// Append a validation pass after the rewrite.
    validation: bool,
    /// Initial properties.
    properties: PropertySet,
}

impl PassManagerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            validation: true,
            properties: PropertySet::new(),
        }
    }

    /// Set the requested number of partitions.
    #[must_use]
    pub fn with_partitions(mut self, n: usize) -> Self {
        self.properties.requested_partitions = Some(n);
        self
    }

    /// Enable or disable the validation pass (enabled by default).
    #[must_use]
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validation = enabled;
        self
    }

    /// Set the initial properties.
    #[must_use]
    pub fn with_properties(mut self, properties: PropertySet) -> Self {
        self.properties = properties;
        self
    }

    /// Build the pass manager and return it with the properties.
    pub fn build(self) -> (PassManager, PropertySet) {
        let mut pm = PassManager::new();
        pm.add_pass(GreedyPartition);
        pm.add_pass(CrossPartitionRewrite);
        if self.validation {
            pm.add_pass(DocumentValidation);
        }
        (pm, self.properties)
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::PartitionMap;
    use qsplit_ir::catalog;

    #[test]
    fn test_empty_pass_manager() {
        let pm = PassManager::new();
        assert!(pm.is_empty());
        assert_eq!(pm.len(), 0);

        let mut doc = CircuitDocument::new(2);
        doc.place(0, 0, catalog::h()).unwrap();
        pm.run(&mut doc, &mut PropertySet::new()).unwrap();
        assert_eq!(doc.num_gates(), 1);
    }

    #[test]
    fn test_builder_passes() {
        let (pm, props) = PassManagerBuilder::new().with_partitions(2).build();
        assert_eq!(
            pm.pass_names(),
            vec!["GreedyPartition", "CrossPartitionRewrite", "DocumentValidation"]
        );
        assert_eq!(props.requested_partitions, Some(2));

        let (pm, _) = PassManagerBuilder::new().with_validation(false).build();
        assert_eq!(pm.len(), 2);
    }

    #[test]
    fn test_run_pipeline() {
        let mut doc = CircuitDocument::new(4);
        doc.place(0, 1, catalog::cnot()).unwrap();

        let (pm, mut props) = PassManagerBuilder::new().with_partitions(2).build();
        pm.run(&mut doc, &mut props).unwrap();

        assert_eq!(doc.num_wires(), 6);
        assert_eq!(props.rewrite_report.unwrap().num_ancillas(), 2);
    }

    #[test]
    fn test_supplied_map_skips_partitioning() {
        let mut doc = CircuitDocument::new(4);
        doc.place(0, 1, catalog::cnot()).unwrap();

        let props = PropertySet::new().with_partition_map(PartitionMap::greedy(4, 1));
        let (pm, mut props) = PassManagerBuilder::new()
            .with_properties(props)
            .build();
        pm.run(&mut doc, &mut props).unwrap();

        assert_eq!(doc.num_wires(), 4);
        assert!(props.rewrite_report.unwrap().is_empty());
    }
}
