use indexmap::IndexMap;

use crate::error::Error;
use crate::token::TokenKind;

/// Constant held by a data label.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Double(f64),
    Text(String),
}

impl Literal {
    /// `Ok(None)` if the token is not a literal.
    pub fn from_token(kind: &TokenKind) -> Result<Option<Literal>, Error> {
        match kind {
            TokenKind::Int(text) => match text.parse::<i64>() {
                Ok(v) => Ok(Some(Literal::Int(v))),
                Err(_) => Err(Error::InvalidInteger(text.to_string())),
            },
            TokenKind::Double(text) => match text.parse::<f64>() {
                Ok(v) => Ok(Some(Literal::Double(v))),
                Err(_) => Err(Error::InvalidFloat(text.to_string())),
            },
            TokenKind::Text(text) => Ok(Some(Literal::Text(text.to_string()))),
            _ => Ok(None),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::Int(_) => "an int",
            Literal::Double(_) => "a double",
            Literal::Text(_) => "a string",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    /// Byte address, `None` until the definition is reached in pass two
    Code(Option<usize>),
    /// Inlined at every use site
    Data(Literal),
}

// name -> (line of definition, label)
#[derive(Debug, Default)]
pub struct Labels(IndexMap<String, (usize, Label)>);

impl Labels {
    pub fn new() -> Self {
        Labels(IndexMap::new())
    }

    /// Registers an unresolved code label. A name that already exists is left
    /// untouched and the line of its first definition is returned.
    pub fn insert(&mut self, name: &str, line: usize) -> Option<usize> {
        if let Some((prev, _)) = self.0.get(name) {
            return Some(*prev);
        }
        self.0.insert(name.to_string(), (line, Label::Code(None)));
        None
    }

    pub fn set_pc(&mut self, name: &str, pc: usize) {
        if let Some((_, label)) = self.0.get_mut(name) {
            *label = Label::Code(Some(pc));
        }
    }

    /// Converts the label into a data label holding `value`.
    pub fn set_data(&mut self, name: &str, value: Literal) {
        if let Some((_, label)) = self.0.get_mut(name) {
            *label = Label::Data(value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Label> {
        self.0.get(name).map(|(_, label)| label)
    }

    /// Code labels resolved to `pc`, in definition order.
    pub fn at(&self, pc: usize) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(move |(name, (_, label))| match label {
            Label::Code(Some(addr)) if *addr == pc => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn data(&self) -> impl Iterator<Item = (&str, &Literal)> {
        self.0.iter().filter_map(|(name, (_, label))| match label {
            Label::Data(value) => Some((name.as_str(), value)),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_definition_wins() {
        let mut labels = Labels::new();
        assert_eq!(labels.insert("main", 1), None);
        assert_eq!(labels.insert("main", 5), Some(1));
        assert_eq!(labels.len(), 1);
        assert_eq!(labels.get("main"), Some(&Label::Code(None)));
    }

    #[test]
    fn code_to_data() {
        let mut labels = Labels::new();
        labels.insert("x", 2);
        labels.set_pc("x", 0);
        assert_eq!(labels.at(0).collect::<Vec<_>>(), vec!["x"]);
        labels.set_data("x", Literal::Int(42));
        assert_eq!(labels.get("x"), Some(&Label::Data(Literal::Int(42))));
        assert_eq!(labels.at(0).count(), 0);
        assert_eq!(labels.data().count(), 1);
    }

    #[test]
    fn literal_from_token() {
        assert_eq!(
            Literal::from_token(&TokenKind::Int("42")).unwrap(),
            Some(Literal::Int(42))
        );
        assert_eq!(
            Literal::from_token(&TokenKind::Double("4.25")).unwrap(),
            Some(Literal::Double(4.25))
        );
        assert_eq!(Literal::from_token(&TokenKind::Ident("x")).unwrap(), None);
        assert!(Literal::from_token(&TokenKind::Int("99999999999999999999")).is_err());
    }
}
