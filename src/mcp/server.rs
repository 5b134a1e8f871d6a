/// JSON-RPC server over stdin/stdout
///
/// This module implements the server loop that:
/// 1. Reads one JSON-RPC request per line from stdin
/// 2. Routes tool calls to the habit store
/// 3. Writes one JSON-RPC response per line to stdout

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::storage::PersistenceGateway;
use crate::store::{HabitStore, StoreError};
use crate::tools;
use crate::ServerError;

/// Server that owns the habit store and answers JSON-RPC requests
pub struct McpServer<G: PersistenceGateway> {
    store: HabitStore<G>,
    initialized: bool,
}

impl<G: PersistenceGateway> McpServer<G> {
    pub fn new(store: HabitStore<G>) -> Self {
        Self {
            store,
            initialized: false,
        }
    }

    pub fn store(&self) -> &HabitStore<G> {
        &self.store
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Serve requests until stdin closes
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Waiting for JSON-RPC requests on stdin");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("Server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Handle one line of input; notifications and blank lines get no reply
    pub async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        if request.method.starts_with("notifications/") {
            if request.method == "notifications/initialized" {
                self.initialized = true;
            }
            debug!("Notification {}", request.method);
            return None;
        }

        Some(self.handle_request(request).await)
    }

    async fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(request.id, Value::Null)
            }
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request),
            _ => JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        }
    }

    fn handle_initialize(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        info!("Client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Shamsi Habits".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        respond(request.id, &result)
    }

    fn handle_tools_list(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        respond(request.id, &json!({ "tools": tool_definitions() }))
    }

    fn handle_tools_call(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match request.params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        request.id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let name = tool_params.name.clone();
        let args = tool_params.arguments_value();
        debug!("Calling tool {}", name);

        let result = match name.as_str() {
            "habit_add" => self.call(args, tools::create_habit),
            "habit_update" => self.call(args, tools::update_habit),
            "habit_delete" => self.call(args, tools::delete_habit),
            "habit_toggle_today" => self.call(args, tools::toggle_today),
            "habit_archive" => self.call(args, tools::archive_habit),
            "habit_unarchive" => self.call(args, tools::unarchive_habit),
            "habit_reorder" => self.call(args, tools::reorder_habits),
            "theme_set" => self.call(args, tools::set_theme),
            "habit_list" => match parse_args::<tools::ListHabitsParams>(args) {
                Ok(params) => ToolCallResult::json(&tools::list_habits(&self.store, params)),
                Err(result) => result,
            },
            "habit_archived" => ToolCallResult::json(&tools::list_archived(&self.store)),
            "habit_stats" => ToolCallResult::json(&tools::habit_stats(&self.store)),
            "theme_get" => ToolCallResult::json(&tools::get_theme(&self.store)),
            _ => ToolCallResult::error(format!("Unknown tool: {}", name)),
        };

        if result.is_error {
            warn!("Tool {} failed", name);
        }

        respond(request.id, &result)
    }

    /// Deserialize arguments and run a mutating tool against the store
    fn call<P, R, F>(&mut self, args: Value, tool: F) -> ToolCallResult
    where
        P: DeserializeOwned,
        R: Serialize,
        F: FnOnce(&mut HabitStore<G>, P) -> Result<R, StoreError>,
    {
        let params = match parse_args::<P>(args) {
            Ok(params) => params,
            Err(result) => return result,
        };

        match tool(&mut self.store, params) {
            Ok(response) => ToolCallResult::json(&response),
            Err(e) => ToolCallResult::store_error(&e),
        }
    }
}

fn parse_args<P: DeserializeOwned>(args: Value) -> Result<P, ToolCallResult> {
    serde_json::from_value(args).map_err(|e| {
        ToolCallResult::error(format!(
            "[{}] Invalid arguments: {}",
            error_codes::INVALID_PARAMS,
            e
        ))
    })
}

fn respond<T: Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Failed to serialize result: {}", e),
            None,
        ),
    }
}

fn input_schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or_else(|_| no_arguments())
}

fn no_arguments() -> Value {
    json!({ "type": "object", "properties": {} })
}

fn tool(name: &str, description: &str, input_schema: Value) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

/// Every tool the server answers to
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        tool(
            "habit_add",
            "Create a new habit with a monthly goal",
            input_schema::<tools::CreateHabitParams>(),
        ),
        tool(
            "habit_update",
            "Change a habit's name, color, icon, goal or completion history",
            input_schema::<tools::UpdateHabitParams>(),
        ),
        tool(
            "habit_delete",
            "Permanently delete an active habit",
            input_schema::<tools::HabitRef>(),
        ),
        tool(
            "habit_toggle_today",
            "Mark or unmark a habit as done today",
            input_schema::<tools::HabitRef>(),
        ),
        tool(
            "habit_archive",
            "Move a habit into the archive",
            input_schema::<tools::HabitRef>(),
        ),
        tool(
            "habit_unarchive",
            "Restore an archived habit to the end of the list",
            input_schema::<tools::HabitRef>(),
        ),
        tool(
            "habit_reorder",
            "Set the display order of active habits",
            input_schema::<tools::ReorderParams>(),
        ),
        tool(
            "habit_list",
            "List active habits in display order with progress, streaks and this month's heatmap",
            input_schema::<tools::ListHabitsParams>(),
        ),
        tool("habit_archived", "List archived habits", no_arguments()),
        tool(
            "habit_stats",
            "Totals across all active habits",
            no_arguments(),
        ),
        tool("theme_get", "Read the display theme preference", no_arguments()),
        tool(
            "theme_set",
            "Set the display theme preference",
            input_schema::<tools::SetThemeParams>(),
        ),
    ]
}
