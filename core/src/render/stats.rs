//! Rendering statistics.

use alloc::{format, string::String};
use core::fmt::{self, Display, Formatter};
use core::ops::AddAssign;
use core::time::Duration;
#[cfg(feature = "std")]
use std::time::Instant;

/// Accumulated rendering statistics and performance data.
///
/// The renderer records one `Stats` per draw call and adds it to its
/// running total, available from [`Renderer::stats`][super::Renderer::stats].
#[derive(Clone, Debug, Default)]
pub struct Stats {
    /// Time spent rendering. Only measured with the `std` feature.
    pub time: Duration,
    /// Number of draw calls issued.
    pub calls: usize,

    /// Triangles assembled / triangles covering at least one pixel.
    pub prims: Throughput,
    /// Vertices shaded / vertices of triangles covering at least one pixel.
    pub verts: Throughput,
    /// Fragments inside triangles / fragments written.
    pub frags: Throughput,

    #[cfg(feature = "std")]
    start: Option<Instant>,
}

/// A count of items input to, and output from, a pipeline stage.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Throughput {
    /// Count of items submitted.
    pub i: usize,
    /// Count of items that made it through.
    pub o: usize,
}

impl Stats {
    /// Creates a new zeroed `Stats` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `Stats` instance that records the time of its creation.
    ///
    /// Call [`finish`][Self::finish] to write the elapsed time to `self.time`.
    /// Equivalent to [`Stats::new`] if the `std` feature is not enabled.
    pub fn start() -> Self {
        Self {
            #[cfg(feature = "std")]
            start: Some(Instant::now()),
            ..Self::default()
        }
    }

    /// Stops the timer and records the elapsed time to `self.time`.
    ///
    /// No-op if the timer was not running, or if the `std` feature is not
    /// enabled.
    pub fn finish(self) -> Self {
        Self {
            #[cfg(feature = "std")]
            time: self.start.map(|st| st.elapsed()).unwrap_or(self.time),
            #[cfg(feature = "std")]
            start: None,
            ..self
        }
    }

    fn throughput(&self) -> [Throughput; 3] {
        [self.prims, self.verts, self.frags]
    }
}

impl Throughput {
    /// Returns the ratio of output to input items, or `None` if there
    /// was no input.
    pub fn ratio(&self) -> Option<f32> {
        (self.i > 0).then(|| self.o as f32 / self.i as f32)
    }

    fn scaled(&self, factor: f32) -> Self {
        Self {
            i: (self.i as f32 * factor) as usize,
            o: (self.o as f32 * factor) as usize,
        }
    }
}

impl Display for Stats {
    #[rustfmt::skip]
    #[inline(never)]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let w = f.width().unwrap_or(16);
        let secs = if self.time.is_zero() { 1.0 } else { self.time.as_secs_f32() };
        let calls = self.calls.max(1);

        writeln!(f, " STATS  {:>w$} │ {:>w$} │ {:>w$}", "TOTAL", "PER SEC", "PER CALL")?;
        writeln!(f, "────────{e:─>w$}─┼─{e:─>w$}─┼─{e:─>w$}─", e = "")?;
        writeln!(f, " time   {:>w$} │ {e:w$} │ {:>w$}",
            human_time(self.time),
            human_time(self.time / calls as u32),
            e = ""
        )?;
        writeln!(f, " calls  {:>w$} │ {:>w$.1} │",
            self.calls,
            self.calls as f32 / secs,
        )?;
        writeln!(f, "────────{e:─>w$}─┼─{e:─>w$}─┼─{e:─>w$}─", e = "")?;

        for (lbl, tot) in ["prims", "verts", "frags"].into_iter().zip(self.throughput()) {
            let per_s = tot.scaled(1.0 / secs);
            let per_c = tot.scaled(1.0 / calls as f32);
            if f.alternate() {
                writeln!(f, " {lbl:6} {tot:#w$} │ {per_s:#w$} │ {per_c:#w$}")?;
            } else {
                writeln!(f, " {lbl:6} {tot:w$} │ {per_s:w$} │ {per_c:w$}")?;
            }
        }
        Ok(())
    }
}

impl Display for Throughput {
    #[inline(never)]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let w = f.width().unwrap_or(10);
        if f.alternate() {
            match self.ratio() {
                None => write!(f, "{:>w$}", "--"),
                Some(r) => write!(f, "{:>w$.1}%", 100.0 * r, w = w - 1),
            }
        } else {
            let io = format!("{} / {}", human_num(self.i), human_num(self.o));
            write!(f, "{io:>w$}")
        }
    }
}

impl AddAssign for Stats {
    /// Appends the stats of `other` to `self`.
    fn add_assign(&mut self, other: Self) {
        self.time += other.time;
        self.calls += other.calls;
        self.prims += other.prims;
        self.verts += other.verts;
        self.frags += other.frags;
    }
}

impl AddAssign for Throughput {
    fn add_assign(&mut self, rhs: Self) {
        self.i += rhs.i;
        self.o += rhs.o;
    }
}

#[inline(never)]
fn human_num(n: usize) -> String {
    if n < 1_000 {
        format!("{n:5}")
    } else if n < 100_000 {
        format!("{:4.1}k", n as f32 / 1_000.)
    } else if n < 1_000_000 {
        format!("{:4}k", n / 1_000)
    } else if n < 100_000_000 {
        format!("{:4.1}M", n as f32 / 1_000_000.)
    } else if n < 1_000_000_000 {
        format!("{:4}M", n / 1_000_000)
    } else {
        format!("{:4.1}G", n as f32 / 1_000_000_000.)
    }
}

#[inline(never)]
fn human_time(d: Duration) -> String {
    let secs = d.as_secs_f32();
    if secs < 1e-3 {
        format!("{:4.1}μs", secs * 1_000_000.)
    } else if secs < 1.0 {
        format!("{:4.1}ms", secs * 1_000.)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{}min {:02.0}s", (secs / 60.0) as u32, secs % 60.0)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    fn sample() -> Stats {
        Stats {
            time: Duration::from_secs(2),
            calls: 4,
            prims: Throughput { i: 1000, o: 500 },
            verts: Throughput { i: 3000, o: 1500 },
            frags: Throughput { i: 0, o: 0 },
            ..Stats::default()
        }
    }

    #[test]
    fn throughput_display() {
        let t = Throughput { i: 1000, o: 500 };
        assert_eq!(format!("{t:16}"), "    1.0k /   500");
        assert_eq!(format!("{t:#16}"), "           50.0%");
        assert_eq!(format!("{:#8}", Throughput::default()), "      --");
    }

    #[test]
    fn stats_display_rows() {
        let s = format!("{}", sample());
        let lines: alloc::vec::Vec<_> = s.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[0].starts_with(" STATS"));
        assert!(lines[0].ends_with("PER CALL"));
        assert!(lines[2].starts_with(" time"));
        assert!(lines[2].ends_with("500.0ms"));
        assert!(lines[3].contains(" 2.0 │"));
        assert_eq!(
            lines[5],
            " prims      1.0k /   500 │      500 /   250 │      250 /   125"
        );
    }

    #[test]
    fn add_assign_accumulates() {
        let mut total = Stats::new();
        total += sample();
        total += sample();
        assert_eq!(total.calls, 8);
        assert_eq!(total.time, Duration::from_secs(4));
        assert_eq!(total.verts, Throughput { i: 6000, o: 3000 });
    }

    #[test]
    fn ratio() {
        assert_eq!(Throughput { i: 4, o: 1 }.ratio(), Some(0.25));
        assert_eq!(Throughput::default().ratio(), None);
    }

    #[test]
    fn human_nums() {
        assert_eq!(human_num(10), "   10");
        assert_eq!(human_num(123), "  123");
        assert_eq!(human_num(1_234), " 1.2k");
        assert_eq!(human_num(123_456), " 123k");
        assert_eq!(human_num(1_234_567), " 1.2M");
        assert_eq!(human_num(123_456_789), " 123M");
        assert_eq!(human_num(1_234_567_890), " 1.2G");
    }

    #[test]
    fn human_times() {
        assert_eq!(human_time(Duration::from_micros(123)), "123.0μs");
        assert_eq!(human_time(Duration::from_millis(123)), "123.0ms");
        assert_eq!(human_time(Duration::from_millis(1234)), "1.2s");
        assert_eq!(human_time(Duration::from_secs(1234)), "20min 34s");
    }
}
