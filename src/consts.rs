pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Defaults and limits shared by the CLI, the TUI and the API client.

    // =============================================================================
    // RUNTIME API
    // =============================================================================

    /// Base URL of a runtime started locally with its default settings.
    pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

    /// Seconds between automatic refreshes when nothing else is configured.
    pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 10;

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity log.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Capacity of the channel carrying action outcomes back to the UI loop.
    pub const OUTCOME_QUEUE_SIZE: usize = 64;

    /// How long the UI loop waits for a key press before redrawing (milliseconds).
    pub const UI_POLL_INTERVAL_MS: u64 = 100;

    // =============================================================================
    // FILES
    // =============================================================================

    /// Directory under the user's home holding config and TUI logs.
    pub const CONFIG_DIR_NAME: &str = ".patchdash";

    pub const CONFIG_FILE_NAME: &str = "config.json";

    pub const LOG_FILE_NAME: &str = "patchdash.log";
}
