#[cfg(all(not(target_arch = "wasm32"), feature = "python"))]
use pyo3::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod annotator;
pub mod assembler;
pub mod ast;
pub mod chunking;
pub mod clause;
pub mod constituents;
pub mod depth;
pub mod disambiguation;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod render;
pub mod syntactic;
pub mod tags;
pub mod types;

pub use annotator::{Annotator, AnnotatorOptions};
pub use ast::{Node, Token};
pub use error::{ChunkError, PavitaError};
pub use grammar::GrammarTable;
pub use syntactic::{ParseStrategy, SyntacticParser};

/// Annotate pre-tagged text with the bundled grammar and return pretty JSON.
pub fn annotate_to_json(text: &str, options: AnnotatorOptions) -> Result<String, PavitaError> {
    let annotator = Annotator::with_bundled_grammar(options)?;
    let output = annotator.annotate_text(text);
    serde_json::to_string_pretty(&output).map_err(PavitaError::Output)
}

#[cfg(all(not(target_arch = "wasm32"), feature = "python"))]
#[pyfunction]
fn annotate_text(text: String) -> PyResult<String> {
    annotate_to_json(&text, AnnotatorOptions::default())
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string()))
}

#[cfg(all(not(target_arch = "wasm32"), feature = "python"))]
#[pyfunction]
fn annotate_text_with_options(text: String, options_json: String) -> PyResult<String> {
    let options = AnnotatorOptions::from_json(&options_json)
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;
    annotate_to_json(&text, options)
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string()))
}

#[cfg(all(not(target_arch = "wasm32"), feature = "python"))]
#[pyfunction]
fn render_tree(tree_json: String) -> PyResult<String> {
    let tree: Node = serde_json::from_str(&tree_json)
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;
    Ok(render::pretty(&tree))
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn annotate_text_wasm(text: &str) -> Result<String, JsValue> {
    annotate_to_json(text, AnnotatorOptions::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn annotate_text_with_options_wasm(
    text: &str,
    use_disambiguation: bool,
    use_syntactic: bool,
    validate_structure: bool,
) -> Result<String, JsValue> {
    let options = AnnotatorOptions {
        use_disambiguation,
        use_syntactic,
        validate_structure,
        ..AnnotatorOptions::default()
    };
    annotate_to_json(text, options).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(all(not(target_arch = "wasm32"), feature = "python"))]
#[pymodule]
fn pavita_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(annotate_text, m)?)?;
    m.add_function(wrap_pyfunction!(annotate_text_with_options, m)?)?;
    m.add_function(wrap_pyfunction!(render_tree, m)?)?;
    Ok(())
}
