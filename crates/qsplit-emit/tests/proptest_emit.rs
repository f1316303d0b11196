//! Property-based tests for the emitters.

use proptest::prelude::*;
use qsplit_emit::{Dialect, EmitError, emit};
use qsplit_ir::{Instruction, LoweredProgram, OpCode, WireId};

/// A program of random ops, one instruction per column.
fn arb_program() -> impl Strategy<Value = LoweredProgram> {
    let inst = (prop::sample::select(OpCode::ALL.to_vec()), -4.0f64..4.0, 0..3u32);
    prop::collection::vec(inst, 0..20).prop_map(|ops| {
        let mut program = LoweredProgram::new(6);
        for (column, (op, angle, base)) in ops.into_iter().enumerate() {
            let wires = (0..op.num_wires() as u32).map(|i| WireId(base + i));
            let params = vec![angle; op.num_params()];
            program.push(Instruction::new(op, column, wires).with_params(params));
        }
        program
    })
}

fn statement_lines(text: &str) -> usize {
    text.lines().filter(|l| l.ends_with(';')).count()
}

proptest! {
    #[test]
    fn qasm_emits_one_statement_per_instruction(program in arb_program()) {
        // Header, include and register declaration are statements too.
        let qasm2 = emit(&program, Dialect::Qasm2).unwrap();
        prop_assert_eq!(statement_lines(&qasm2), program.len() + 3);
        let qasm3 = emit(&program, Dialect::Qasm3).unwrap();
        prop_assert_eq!(statement_lines(&qasm3), program.len() + 3);
    }

    #[test]
    fn python_dialects_never_fail(program in arb_program()) {
        let qiskit = emit(&program, Dialect::Qiskit).unwrap();
        prop_assert_eq!(qiskit.matches("\nqc.").count(), program.len());
        let cirq = emit(&program, Dialect::Cirq).unwrap();
        prop_assert_eq!(cirq.matches("cirq.Moment(").count(), program.num_columns());
        let tfq = emit(&program, Dialect::Tfq).unwrap();
        prop_assert_eq!(tfq.matches("cirq.Moment(").count(), program.num_columns());
    }

    #[test]
    fn dialects_reject_exactly_what_they_cannot_express(program in arb_program()) {
        for dialect in Dialect::ALL {
            let expressible = program.instructions().iter().all(|i| dialect.supports(i.op));
            match emit(&program, dialect) {
                Ok(_) => prop_assert!(expressible, "{} accepted an unsupported op", dialect),
                Err(EmitError::UnsupportedOperation { dialect: rejected, op }) => {
                    prop_assert!(!expressible, "{} rejected {}", dialect, op);
                    prop_assert_eq!(rejected, dialect);
                }
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
        }
    }

    #[test]
    fn line_oriented_dialects_emit_one_line_per_instruction(program in arb_program()) {
        if let Ok(text) = emit(&program, Dialect::PyQuil) {
            prop_assert_eq!(text.matches("\np += ").count(), program.len());
        }
        if let Ok(text) = emit(&program, Dialect::Braket) {
            prop_assert_eq!(text.matches("\ncircuit.").count(), program.len());
        }
        if let Ok(text) = emit(&program, Dialect::Quest) {
            prop_assert_eq!(text.lines().filter(|l| l.ends_with(");")).count(), program.len() + 5);
        }
    }

    #[test]
    fn quil_rejects_only_sqrt_x(program in arb_program()) {
        let has_sqrt_x = program
            .instructions()
            .iter()
            .any(|i| matches!(i.op, OpCode::Sx | OpCode::Sxdg | OpCode::Csx));
        match emit(&program, Dialect::Quil) {
            Ok(text) => {
                prop_assert!(!has_sqrt_x);
                prop_assert_eq!(text.lines().count(), program.len());
            }
            Err(EmitError::UnsupportedOperation { .. }) => prop_assert!(has_sqrt_x),
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    #[test]
    fn qobj_is_valid_json(program in arb_program()) {
        let text = emit(&program, Dialect::Qobj).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let emitted = value["experiments"][0]["instructions"].as_array().map_or(0, Vec::len);
        prop_assert_eq!(emitted, program.len());
    }
}
