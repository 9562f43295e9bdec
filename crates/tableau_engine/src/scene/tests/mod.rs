//! Scenario tests driving the whole scene against the headless device
