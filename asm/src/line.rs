/// One raw source line and what is left of it after stripping the `//`
/// comment and surrounding whitespace.
#[derive(Debug, Clone)]
pub struct Line {
    idx: usize,
    raw: String,
    code: String,
}

impl Line {
    pub fn new(idx: usize, raw: &str) -> Self {
        let code = match raw.find("//") {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        Self {
            idx,
            raw: raw.to_string(),
            code: code.trim().to_string(),
        }
    }

    /// 1-based line number for diagnostics.
    pub fn no(&self) -> usize {
        self.idx + 1
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}
