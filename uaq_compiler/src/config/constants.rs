pub mod compile_time {
    pub mod expression {
        /// Maximum filter expression length in bytes
        /// Prevents runaway allocation from pathological inputs
        pub const MAX_EXPRESSION_LENGTH: usize = 4_096;

        /// Maximum identifier length (column / table names)
        pub const MAX_IDENTIFIER_LENGTH: usize = 255;

        /// Maximum number of items inside an IN ( ... ) list
        pub const MAX_MEMBERSHIP_LIST_ITEMS: usize = 100;
    }

    pub mod model {
        /// A request key carries one date range, or two for a comparison
        pub const MIN_DATE_RANGES: usize = 1;
        pub const MAX_DATE_RANGES: usize = 2;

        /// Segment bounds when segments are present
        pub const MIN_SEGMENTS: usize = 1;
        pub const MAX_SEGMENTS: usize = 4;

        /// Dimension column bounds per request
        pub const MIN_DIMENSIONS: usize = 1;
        pub const MAX_DIMENSIONS: usize = 7;

        /// Metric column bounds per request
        pub const MIN_METRICS: usize = 1;
        pub const MAX_METRICS: usize = 10;

        /// Default page size for query options
        pub const DEFAULT_PAGE_SIZE: u64 = 10_000;

        /// Prefix applied to column and filter names on the wire
        pub const WIRE_NAME_PREFIX: &str = "ga:";
    }

    pub mod batch {
        /// Maximum requests per API call batch
        pub const DEFAULT_MAX_BATCH_SIZE: usize = 5;
    }

    pub mod sampling {
        /// Empirical correction applied to the observed sampling ratio when
        /// guessing how many intervals a sampled range must split into.
        /// Tunable heuristic, not a proven bound.
        pub const CORRECTION_NUMERATOR: u64 = 4;
        pub const CORRECTION_DENOMINATOR: u64 = 3;
    }

    pub mod engine {
        /// Submission attempts per request before the drain stops
        pub const DEFAULT_MAX_SUBMIT_ATTEMPTS: u32 = 3;

        /// Hard cap on the refinement work queue
        /// Bounds memory if a response keeps reporting sampling
        pub const MAX_QUEUE_LENGTH: usize = 100_000;
    }
}
