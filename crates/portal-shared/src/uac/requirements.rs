use std::collections::HashMap;

use crate::const_config::path::{PATH_API_SIGN_OUT, PATH_API_WHOAMI};

use super::{Funcoes, PermissionsError};

/// Maps every path behind the access middleware to the funcoes it requires.
///
/// **Note:** All paths that require login must be registered to be accessed
/// even if they require no funcoes
#[derive(Debug, Clone)]
pub struct FuncaoRequirements(HashMap<String, Vec<String>>);

impl Default for FuncaoRequirements {
    fn default() -> Self {
        let mut result = Self(HashMap::new());
        result.insert(PATH_API_SIGN_OUT.path, Vec::<String>::new());
        result.insert(PATH_API_WHOAMI.path, Vec::<String>::new());
        result
    }
}

impl FuncaoRequirements {
    /// Registers (or replaces) the funcoes required for `path`
    pub fn insert<S: Into<String>>(&mut self, path: &str, funcoes: impl IntoIterator<Item = S>) {
        self.0.insert(
            path.to_string(),
            funcoes.into_iter().map(Into::into).collect(),
        );
    }

    #[must_use]
    pub fn with<S: Into<String>>(mut self, path: &str, funcoes: impl IntoIterator<Item = S>) -> Self {
        self.insert(path, funcoes);
        self
    }

    /// Takes a path and returns the funcoes required for it if found
    #[tracing::instrument(ret, skip(self))]
    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.0.get(path).map(|x| &x[..])
    }

    /// Checks that `granted` satisfies the requirements registered for `path`
    pub fn check(&self, path: &str, granted: &Funcoes) -> Result<(), PermissionsError> {
        let Some(required) = self.get(path) else {
            return Err(PermissionsError::PathNotFound(path.to_string()));
        };
        if granted.includes(required) {
            Ok(())
        } else {
            Err(PermissionsError::MissingFuncoes(granted.missing(required)))
        }
    }
}
