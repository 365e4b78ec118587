/// Declares a static global [`MillisCounter`](crate::clock::MillisCounter).
///
/// The counter is meant to be advanced from a timer interrupt and read from the
/// main loop, which may also hand `&NAME` to a
/// [`Session`](crate::session::Session) as its clock.
///
/// # Arguments
/// - `$name`: Name of the static
///
/// # Example
/// ```rust
/// use rf_stopwatch::clock::Clock;
///
/// rf_stopwatch::millis_clock!(MILLIS);
///
/// // #[interrupt]
/// fn tim2() {
///     MILLIS.tick(1);
/// }
/// # tim2();
/// # assert_eq!(MILLIS.now_ms(), 1);
/// ```
#[macro_export]
macro_rules! millis_clock {
    ( pub $name:ident ) => {
        pub static $name: $crate::clock::MillisCounter = $crate::clock::MillisCounter::new();
    };
    ( $name:ident ) => {
        static $name: $crate::clock::MillisCounter = $crate::clock::MillisCounter::new();
    };
}
