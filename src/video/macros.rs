/// Performs a raw visitor call through `Device::call`, which drains stale error flags,
/// runs the call and reports any new error with the call site.
///
/// ```ignore
/// let id = gl_call!(device, create_buffer());
/// gl_call!(device, bind_buffer(BufferTarget::Array, id));
/// ```
macro_rules! gl_call {
    ($device:expr, $func:ident($($arg:expr),* $(,)*)) => {
        $device.call(stringify!($func), file!(), line!(), |visitor| unsafe {
            visitor.$func($($arg),*)
        })
    };
}

/// Same as `gl_call!`, but evaluates to `false` if the call raised a device error.
macro_rules! gl_check {
    ($device:expr, $func:ident($($arg:expr),* $(,)*)) => {
        $device
            .checked_call(stringify!($func), file!(), line!(), |visitor| unsafe {
                visitor.$func($($arg),*)
            })
            .1
    };
}
