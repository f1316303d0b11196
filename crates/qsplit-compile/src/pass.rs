//! Pass trait and types for document passes.

use qsplit_ir::CircuitDocument;

use crate::error::CompileResult;
use crate::property::PropertySet;

/// The kind of pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Reads the document and writes to the `PropertySet`.
    Analysis,
    /// Modifies the document.
    Transformation,
}

/// A pass over a circuit document.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Get the kind of this pass.
    fn kind(&self) -> PassKind;

    /// Run the pass on the given document.
    ///
    /// Analysis passes leave the document alone and may write to the
    /// `PropertySet`. Transformation passes modify the document and may
    /// record what they did.
    fn run(&self, doc: &mut CircuitDocument, properties: &mut PropertySet) -> CompileResult<()>;

    /// Check if this pass should run based on current state.
    fn should_run(&self, _doc: &CircuitDocument, _properties: &PropertySet) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl Pass for Noop {
        fn name(&self) -> &'static str {
            "noop"
        }

        fn kind(&self) -> PassKind {
            PassKind::Analysis
        }

        fn run(&self, _doc: &mut CircuitDocument, _props: &mut PropertySet) -> CompileResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_pass_defaults() {
        let pass = Noop;
        assert_eq!(pass.kind(), PassKind::Analysis);
        assert_eq!(pass.name(), "noop");
        assert!(pass.should_run(&CircuitDocument::new(1), &PropertySet::new()));
    }
}
