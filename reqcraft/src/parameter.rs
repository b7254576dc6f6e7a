use encoding::percent::escape;

/// Where a parameter lives in the request.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum ParameterKind {
    /// Query string of the request target.
    #[default]
    Url,
    /// Form encoded request body.
    Body,
}

/// A decoded name/value pair, encoded only when written into a request.
#[derive(Debug, PartialEq, Clone)]
pub struct Parameter {
    pub name: String,
    pub value: String,
    pub kind: ParameterKind,
}

impl Parameter {
    pub fn new(name: &str, value: &str, kind: ParameterKind) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            kind,
        }
    }

    pub fn url(name: &str, value: &str) -> Self {
        Self::new(name, value, ParameterKind::Url)
    }

    pub fn body(name: &str, value: &str) -> Self {
        Self::new(name, value, ParameterKind::Body)
    }

    /// `name=value` with both sides form encoded.
    pub fn encoded(&self) -> String {
        format!("{}={}", escape(&self.name), escape(&self.value))
    }
}

/// Parameters keyed by name: re-adding a name replaces its value and kind
/// but keeps the position of the first insertion.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ParameterList {
    entries: Vec<Parameter>,
}

impl ParameterList {
    pub fn insert(&mut self, parameter: Parameter) {
        match self.entries.iter_mut().find(|p| p.name == parameter.name) {
            Some(existing) => *existing = parameter,
            None => self.entries.push(parameter),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.entries.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ParameterList {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
