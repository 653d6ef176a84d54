//! User actions.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    Char(char),
    Backspace,
    ClearInput,
    /// Enter: commit the highlighted suggestion or search the typed text.
    Submit,

    SuggestionNext,
    SuggestionPrev,
    DismissSuggestions,

    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollTop,
    ScrollBottom,

    ToggleTheme,
    CopyResult,
    ClearHistory,
    /// Rerun the history entry at this index (0 = most recent).
    RunHistory(usize),
}
