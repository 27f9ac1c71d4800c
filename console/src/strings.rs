macro_rules! define_strings {
    (
        $($name:ident = $value:literal);*$(;)?
    ) => {
        $(
            pub const $name: &str = $value;
        )*
    };
}

pub mod split {
    define_strings! {
        INPUT =
            "Path of the input file. Group marker lines start with \">>\", \
            item marker lines with \">\"; every other non-blank line is data \
            for the most recent item.";
        OUTPUT =
            "Prefix for the generated segment files. Segments are written to \
            <PREFIX>_1.txt, <PREFIX>_2.txt, ... and the run log to \
            <PREFIX>_log.txt. Existing targets abort the run.";
        MAX_ITEMS =
            "Maximum number of items per segment. A group holding more items \
            is split across segments, each opening with a repeat of the \
            group marker line.";
        PREFIXES =
            "Expected field prefixes for data lines, in order. When set, \
            every data line must hold exactly this many whitespace-delimited \
            parts, each starting with its prefix; the prefixes are stripped \
            and the values re-joined with the separator. The first malformed \
            line aborts the run.";
        SEPARATOR =
            "Separator joining stripped field values.";
    }
}

pub mod copy {
    define_strings! {
        QUERIES =
            "Path to a query list: one query per line (an \"itemnum:\" header \
            is tolerated and skipped).";
        TOP =
            "Top directory searched recursively for matching files.";
        OUTPUT =
            "Destination directory. A 0.filelist manifest is written there \
            after copying.";
        PREFIX =
            "Literal pattern prefix placed before each query; a wildcard is \
            used when absent.";
        SUFFIX =
            "Literal pattern suffix placed after each query; a wildcard is \
            used when absent.";
        FORCE =
            "Copy without asking for confirmation.";
    }
}
