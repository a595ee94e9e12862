pub mod dash_consts {
    //! Dashboard Constants
    //!
    //! Domain thresholds, endpoint paths and display limits, grouped by
    //! functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Buffer size of the channel carrying pipeline events back to the controller.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // SIGNIFICANCE THRESHOLDS
    // =============================================================================

    /// Significance thresholds drawn as guide lines on the volcano plot.
    ///
    /// These are fixed domain constants, not derived from the data.
    pub mod thresholds {
        /// Adjusted p-value cutoff (p < 0.05).
        pub const P_VALUE_CUTOFF: f64 = 0.05;
        /// Absolute log2 fold-change cutoff (|log2FC| > 1).
        pub const LOG_FC_CUTOFF: f64 = 1.0;

        /// Height of the p-value guide line, -log10(0.05).
        pub fn neg_log10_p_cutoff() -> f64 {
            -P_VALUE_CUTOFF.log10()
        }
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    pub mod network {
        use std::time::Duration;

        /// Full volcano dataset, no pagination.
        pub const VOLCANO_ENDPOINT: &str = "api/volcano-data";
        /// Per-gene boxplot data, suffixed with the path-escaped gene symbol.
        pub const BOXPLOT_ENDPOINT: &str = "api/boxplot-data";
        /// Per-gene publication info, suffixed with the path-escaped gene symbol.
        pub const GENE_INFO_ENDPOINT: &str = "api/gene-info";

        /// Default connect timeout (seconds)
        pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

        pub const fn default_connect_timeout() -> Duration {
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // PANEL MESSAGES
    // =============================================================================

    pub mod messages {
        /// Shown in the gene info panel when the server returns an empty publication list.
        pub const NO_PUBLICATIONS: &str = "No publications found for this gene.";
        /// Heading above the publication list.
        pub const PUBLICATIONS_HEADING: &str = "Related Publications:";
    }
}
