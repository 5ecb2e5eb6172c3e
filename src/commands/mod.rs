/*!
Command handlers for the CLI

This module provides the handlers invoked by the CLI entrypoint:

- `chat`  — Interactive chat session
- `check` — Backend connectivity diagnostic

The handlers are intentionally small and use the library components:
backends, the orchestrator, and the session model.
*/

pub mod chat;
pub mod check;
