//! End-to-end tests across `hcheck-common` and `hcheck-core`.

#[cfg(test)]
mod support;
#[cfg(test)]
mod verification;
