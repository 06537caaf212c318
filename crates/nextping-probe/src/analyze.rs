use nextping_model::SlotUpdate;

const TIMING_MARKER: &str = "ms";
const LOSS_MARKER: &str = "*";

/// Loss and path summary derived from one probe's evidence.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub loss_percent: f64,
    pub path_info: String,
}

impl Analysis {
    pub fn into_update(self, evidence: String) -> SlotUpdate {
        SlotUpdate {
            loss_percent: self.loss_percent,
            evidence,
            path_info: self.path_info,
        }
    }
}

/// Classifies traceroute output line by line.
///
/// A line carrying a timing marker is one recorded probe; if it also carries
/// a `*` it counts as lost and is surfaced in the path information. Lines
/// without timing (such as a hop that timed out on every probe) are ignored
/// entirely.
pub fn analyze_path_trace(evidence: &str) -> Analysis {
    let mut total = 0u32;
    let mut lost = 0u32;
    let mut path_info = String::new();

    for line in evidence.lines() {
        if !line.contains(TIMING_MARKER) {
            continue;
        }
        total += 1;

        if line.contains(LOSS_MARKER) {
            lost += 1;
            path_info.push_str(line);
            path_info.push('\n');
        }
    }

    let loss_percent = if total > 0 {
        f64::from(lost) / f64::from(total) * 100.0
    } else {
        0.0
    };

    Analysis {
        loss_percent,
        path_info,
    }
}

/// A connect either succeeds or fails as a whole, so there is never partial
/// loss or per-hop detail to report.
pub fn analyze_tcp_reachability(_evidence: &str) -> Analysis {
    Analysis {
        loss_percent: 0.0,
        path_info: String::new(),
    }
}
