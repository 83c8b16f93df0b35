//! Which gates the execution target realizes natively.

use qinspire_ir::{Command, Gate};

/// Whether a gate with the given number of controls can be executed.
///
/// Upstream compiler stages call this to decide whether a command must be
/// decomposed before it reaches the [`Translator`](crate::Translator).
pub fn is_supported(gate: &Gate, control_count: usize) -> bool {
    match gate {
        Gate::X if control_count <= 2 => true,
        Gate::Z if control_count <= 1 => true,
        Gate::Measure | Gate::Allocate | Gate::Deallocate | Gate::Barrier => true,
        _ if control_count != 0 => false,
        g if g.is_fixed_single_qubit() => true,
        Gate::Rx(_) | Gate::Ry(_) | Gate::Rz(_) => true,
        _ => false,
    }
}

/// [`is_supported`] applied to a command.
pub fn is_command_supported(cmd: &Command) -> bool {
    is_supported(&cmd.gate, cmd.control_count())
}
