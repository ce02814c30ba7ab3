pub(crate) const fn _default_port() -> u16 {
    8000
}

#[inline]
pub(crate) fn _default_host() -> String {
    "0.0.0.0".to_owned()
}
