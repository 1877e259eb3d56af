//! Workspace-level integration tests for pathbench live under `tests/`.
