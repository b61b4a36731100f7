//! Edge case tests for lcc-quad, driving the generator from real source.
