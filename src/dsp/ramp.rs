#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Exponential Ramp
================

A gain envelope that falls off the way struck strings do: by a constant
ratio per unit of time rather than a constant amount.

  Level
   0.3 ┐╲
       │ ╲
       │  ╲_
       │    ╲__
  0.01 └───────╲___──→ Time
      start        end

The Math
--------

For a time t between start and end:

    progress = (t - start) / (end - start)
    value    = from * (to / from) ^ progress

At progress 0 that is `from`, at progress 1 it is `to`, and halfway through
it is the geometric mean sqrt(from * to). Before the ramp begins the value
holds at `from`; after it ends it holds at `to`.

Both endpoints must be strictly positive (a ratio to zero never arrives).
Values at or below zero are nudged up to MIN_VALUE.

A ramp whose end is not after its start has no span to cover, so it jumps
straight to `to` from `start` onward.
*/

const MIN_VALUE: f32 = 1.0e-6;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialRamp {
    from: f32,
    to: f32,
    start: f64,
    end: f64,
}

impl ExponentialRamp {
    /// Ramp from `from` at time `start` to `to` at time `end` (seconds).
    pub fn new(from: f32, to: f32, start: f64, end: f64) -> Self {
        Self {
            from: from.max(MIN_VALUE),
            to: to.max(MIN_VALUE),
            start,
            end,
        }
    }

    /// Parameter value at absolute time `time`.
    pub fn value_at(&self, time: f64) -> f32 {
        if time < self.start {
            return self.from;
        }

        let span = self.end - self.start;
        if span <= 0.0 || time >= self.end {
            return self.to;
        }

        let progress = ((time - self.start) / span) as f32;
        self.from * (self.to / self.from).powf(progress)
    }

    pub fn start_value(&self) -> f32 {
        self.from
    }

    pub fn end_value(&self) -> f32 {
        self.to
    }

    pub fn start_time(&self) -> f64 {
        self.start
    }

    pub fn end_time(&self) -> f64 {
        self.end
    }
}
