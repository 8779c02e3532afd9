//! Values produced by parsing TAP output.
//!
//! All types implement [`serde::Serialize`]. The serialized form uses the field names and `type`
//! tags of the established JSON representation of TAP documents, e.g. a test entry serializes as
//! `{"type": "tapTest", "title": {..}, "yamlDocContents": {..}}`.
use serde::Serialize;

/// The only TAP version supported.
pub const TAP_VERSION: u32 = 13;

/// A parsed TAP document.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Document {
    /// The TAP version declared by the document.
    pub version: u32,
    /// The test plan, if any. When the document contains several plans, this is the last one.
    #[serde(rename = "testPlan", skip_serializing_if = "Option::is_none")]
    pub test_plan: Option<Plan>,
    /// The text of all diagnostic lines in order.
    pub diagnostics: Vec<String>,
    /// All test results in order.
    pub tests: Vec<TestEntry>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: TAP_VERSION,
            test_plan: None,
            diagnostics: vec![],
            tests: vec![],
        }
    }
}

/// A test plan line, `<start>..<through>`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Plan {
    /// First test number.
    pub start: u64,
    /// Last test number.
    pub through: u64,
}

/// A test result line together with its YAML block.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(tag = "type", rename = "tapTest")]
pub struct TestEntry {
    /// The test result line.
    pub title: TestTitle,
    /// The YAML block following the test result line.
    #[serde(rename = "yamlDocContents")]
    pub yaml: YamlBlock,
}

/// A test result line, `(ok|not ok) [number] [description] [# directive]`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(tag = "type", rename = "tapTestTitle")]
pub struct TestTitle {
    /// Whether the test passed.
    pub ok: bool,
    /// The test number, if given.
    #[serde(rename = "testNumber", skip_serializing_if = "Option::is_none")]
    pub test_number: Option<u64>,
    /// The description with trailing whitespace removed. `None` when absent or empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The directive of the test, if any.
    #[serde(rename = "diagnostic", skip_serializing_if = "Option::is_none")]
    pub directive: Option<Directive>,
}

/// Directive changing how a test result is interpreted.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Directive {
    /// The test is not expected to pass yet.
    Todo,
    /// The test was not run.
    Skip,
}

/// The raw lines of a YAML block.
///
/// The lines between the `---` and `...` delimiters with the block's indentation removed. Any
/// further indentation is kept, the content is not parsed as YAML.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(tag = "type", rename = "yamlDocLines")]
pub struct YamlBlock {
    /// The lines of the block.
    #[serde(rename = "yamlDocLines")]
    pub lines: Vec<String>,
}

/// Any line that can follow the version line, as produced by
/// [`tap_line`][crate::grammar::tap_line].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TapLine {
    /// A test plan.
    Plan(Plan),
    /// The text of a diagnostic line.
    Diagnostic(String),
    /// A test result with its YAML block.
    Test(TestEntry),
}
