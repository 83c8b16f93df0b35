//! Frozen cQASM programs.

use qinspire_ir::QubitId;
use std::fmt;

/// Format-version marker every program starts with.
pub const VERSION_LINE: &str = "version 1.0";

/// A finished cQASM program ready to be handed to an executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CqasmProgram {
    text: String,
    num_qubits: u32,
    measured: Vec<QubitId>,
}

impl CqasmProgram {
    /// Assemble the program text from its header and body.
    pub fn assemble(
        generator: &str,
        num_qubits: u32,
        body: &[String],
        measured: Vec<QubitId>,
    ) -> Self {
        let mut text = String::new();
        text.push_str(VERSION_LINE);
        text.push('\n');
        text.push_str("# generated by ");
        text.push_str(generator);
        text.push('\n');
        text.push_str(&format!("qubits {num_qubits}\n\n"));
        for line in body {
            text.push_str(line);
            text.push('\n');
        }
        Self {
            text,
            num_qubits,
            measured,
        }
    }

    /// The program text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Register width declared in the header.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Logical ids in measurement order, duplicates preserved.
    pub fn measured(&self) -> &[QubitId] {
        &self.measured
    }

    /// Consume the program, returning its text.
    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for CqasmProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
