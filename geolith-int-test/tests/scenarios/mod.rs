//! Fixed scenarios with known answers.

mod scenario_test;
