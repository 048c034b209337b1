//! Java → C++ statement rewriting

use super::Statement;
use crate::rules::java_cpp::JAVA_TO_CPP;

/// Rewrite one masked Java statement line
pub fn translate(code: &str) -> Statement {
    let code = code.trim();
    if code.is_empty() {
        return Statement::default();
    }
    Statement::new(JAVA_TO_CPP.apply(code))
}
