//! Glyph compositing over disjoint surface bands.

use std::thread;

use crate::color::Rgba;
use crate::face::GlyphFace;
use crate::fixed::Rect;
use crate::surface::{Band, Surface};

/// Immutable snapshot of one glyph to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphJob {
    pub rune: char,
    /// Pen position in surface pixels (top-left of the rune box).
    pub x: i32,
    pub y: i32,
    pub color: Rgba,
}

/// Jobs grouped per visual line, with the surface rows each line owns.
#[derive(Debug, Default)]
pub struct GlyphBatch {
    rows: Vec<(i32, i32)>,
    jobs: Vec<Vec<GlyphJob>>,
}

impl GlyphBatch {
    /// Start a new band covering rows `[top, bottom)`.
    pub fn open_band(&mut self, top: i32, bottom: i32) {
        self.rows.push((top, bottom));
        self.jobs.push(Vec::new());
    }

    /// Queue a job on the most recent band.
    pub fn push(&mut self, job: GlyphJob) {
        if let Some(jobs) = self.jobs.last_mut() {
            jobs.push(job);
        }
    }

    #[must_use]
    pub fn band_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn job_count(&self) -> usize {
        self.jobs.iter().map(Vec::len).sum()
    }

    /// Composite every job using at most `workers` threads.
    ///
    /// Returns the number of glyphs drawn and the number of workers used.
    /// All workers are joined before returning.
    pub fn composite(
        self,
        surface: &mut Surface,
        face: &dyn GlyphFace,
        clip: Rect,
        workers: usize,
    ) -> (usize, usize) {
        let bands = surface.bands_mut(&self.rows);
        let mut work: Vec<(Band<'_>, Vec<GlyphJob>)> = bands
            .into_iter()
            .zip(self.jobs)
            .filter(|(band, jobs)| !band.is_empty() && !jobs.is_empty())
            .collect();
        if work.is_empty() {
            return (0, 0);
        }

        let workers = workers.clamp(1, work.len());
        if workers == 1 {
            return (composite_group(&mut work, face, clip), 1);
        }

        let mut groups: Vec<Vec<(Band<'_>, Vec<GlyphJob>)>> =
            (0..workers).map(|_| Vec::new()).collect();
        for (i, item) in work.into_iter().enumerate() {
            groups[i % workers].push(item);
        }

        let drawn = thread::scope(|s| {
            let mut groups = groups.into_iter();
            let mut local = groups.next().unwrap_or_default();
            let handles: Vec<_> = groups
                .map(|mut group| s.spawn(move || composite_group(&mut group, face, clip)))
                .collect();
            let mut drawn = composite_group(&mut local, face, clip);
            for handle in handles {
                drawn += handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
            }
            drawn
        });
        (drawn, workers)
    }
}

fn composite_group(group: &mut [(Band<'_>, Vec<GlyphJob>)], face: &dyn GlyphFace, clip: Rect) -> usize {
    let mut drawn = 0;
    for (band, jobs) in group.iter_mut() {
        for job in jobs.iter() {
            let Some(mask) = face.glyph(job.rune) else {
                continue;
            };
            band.composite_mask(job.x + mask.left, job.y + mask.top, &mask, job.color, clip);
            drawn += 1;
        }
    }
    drawn
}
