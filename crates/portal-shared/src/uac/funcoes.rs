use std::collections::BTreeSet;

/// The role identifiers granted to a user by the permissions service
#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, Default, PartialEq, Eq, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct Funcoes(BTreeSet<String>);

impl Funcoes {
    /// True when every role in `required` has been granted (vacuously true for
    /// an empty slice)
    pub fn includes<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.iter().all(|x| self.contains(x.as_ref()))
    }

    pub fn contains(&self, funcao: &str) -> bool {
        self.0.contains(funcao)
    }

    /// Returns the roles in `required` that have not been granted
    pub fn missing<S: AsRef<str>>(&self, required: &[S]) -> Vec<String> {
        let mut result = Vec::new();
        for funcao in required {
            let funcao: &str = funcao.as_ref();
            if !self.contains(funcao) {
                result.push(funcao.to_string());
            }
        }
        result
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Funcoes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for Funcoes {
    fn from(value: Vec<String>) -> Self {
        value.into_iter().collect()
    }
}
