pub trait ResultOkLogExt<T, E> {
    fn ok_warn(self, context: &str) -> Option<T>;

    fn ok_warn_to(self, target: &str, context: impl FnOnce() -> String) -> Option<T>;
}

impl<T, E> ResultOkLogExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    /// Downgrades the error to a warning prefixed with `context`.
    fn ok_warn(self, context: &str) -> Option<T> {
        match self {
            Ok(ok) => Some(ok),
            Err(err) => {
                log::warn!("{context}: {err}");
                None
            }
        }
    }

    /// Like [`ok_warn`](Self::ok_warn), but logs to `target` and only builds
    /// the context on error.
    fn ok_warn_to(self, target: &str, context: impl FnOnce() -> String) -> Option<T> {
        match self {
            Ok(ok) => Some(ok),
            Err(err) => {
                log::warn!(target: target, "{}: {}", context(), err);
                None
            }
        }
    }
}
