/// Unchecked table access for hot paths.
///
/// Callers guarantee every index is in bounds; in this crate indices come from a
/// `Square` other than `Square::None` or from an 8-bit line pattern.
#[macro_export]
macro_rules! uget {
    ($arr:expr; $i:expr $(,)?) => {{
        debug_assert!($i < ($arr).len());
        #[allow(unused_unsafe)]
        #[allow(clippy::macro_metavars_in_unsafe)]
        unsafe {{ ($arr).get_unchecked($i) }}
    }};
    ($arr:expr; $i:expr, $($rest:expr),+ $(,)?) => {{
        let __p = $crate::uget!($arr; $i);
        $crate::uget!(&*__p; $($rest),+)
    }};
}
