use std::process::ExitCode;

use infralint::DocumentKind;

fn main() -> ExitCode {
    infralint::cli::main(DocumentKind::Compose)
}
