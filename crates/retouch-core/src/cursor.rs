/// Pointer cursor the host should show. Purely presentational.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorHint {
    #[default]
    Default,
    Crosshair,
    Grab,
    Grabbing,
    Move,
    /// Top-left / bottom-right diagonal.
    NwseResize,
    /// Top-right / bottom-left diagonal.
    NeswResize,
    NsResize,
    EwResize,
}
