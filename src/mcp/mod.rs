//! Stdio tool server for AI assistants
//!
//! Speaks line-delimited JSON-RPC 2.0 (the Model Context Protocol transport)
//! on stdin/stdout and exposes the weather and clothing lookups as tools and
//! a `weather_advice` prompt. Logging must go to stderr while this runs.

pub mod prompts;
pub mod protocol;

use serde_json::{Map, Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::service::AdvisoryService;
use crate::{AdvisorError, Result, VERSION};
use protocol::{
    INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR, PromptGetParams, RpcRequest, RpcResponse,
    ToolCallParams,
};

pub const SERVER_NAME: &str = "weather-clothing-server";
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub struct McpServer {
    service: Arc<AdvisoryService>,
}

impl McpServer {
    #[must_use]
    pub fn new(service: Arc<AdvisoryService>) -> Self {
        Self { service }
    }

    /// Serve requests from stdin until it closes
    pub async fn run_stdio(&self) -> Result<()> {
        info!("Tool server listening on stdio");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve line-delimited requests from `input`, writing replies to `output`
    pub async fn serve<R, W>(&self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = BufReader::new(input).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let Some(response) = self.handle_line(&line).await else {
                continue;
            };
            let mut encoded = serde_json::to_vec(&response)
                .map_err(|e| AdvisorError::general(format!("Failed to encode response: {e}")))?;
            encoded.push(b'\n');
            output.write_all(&encoded).await?;
            output.flush().await?;
        }
        info!("stdin closed, tool server stopping");
        Ok(())
    }

    /// Decode and dispatch one line; `None` for notifications
    pub async fn handle_line(&self, line: &str) -> Option<RpcResponse> {
        match serde_json::from_str::<RpcRequest>(line) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                warn!("Unparseable request: {}", e);
                Some(RpcResponse::error(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ))
            }
        }
    }

    pub async fn handle(&self, request: RpcRequest) -> Option<RpcResponse> {
        if request.is_notification() {
            debug!("Notification {}", request.method);
            return None;
        }
        debug!("Handling {}", request.method);
        let RpcRequest {
            method, params, id, ..
        } = request;
        let params = params.unwrap_or(Value::Null);
        let id = id.unwrap_or(Value::Null);

        let response = match method.as_str() {
            "initialize" => RpcResponse::success(id, initialize_result()),
            "ping" => RpcResponse::success(id, json!({})),
            "tools/list" => RpcResponse::success(id, json!({ "tools": tool_definitions() })),
            "tools/call" => match serde_json::from_value::<ToolCallParams>(params) {
                Ok(call) => RpcResponse::success(id, self.call_tool(call).await),
                Err(e) => RpcResponse::error(id, INVALID_PARAMS, format!("Invalid params: {e}")),
            },
            "prompts/list" => {
                RpcResponse::success(id, json!({ "prompts": prompt_definitions() }))
            }
            "prompts/get" => match serde_json::from_value::<PromptGetParams>(params) {
                Ok(get) => match self.get_prompt(get).await {
                    Ok(result) => RpcResponse::success(id, result),
                    Err(message) => RpcResponse::error(id, INVALID_PARAMS, message),
                },
                Err(e) => RpcResponse::error(id, INVALID_PARAMS, format!("Invalid params: {e}")),
            },
            other => RpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {other}")),
        };
        Some(response)
    }

    async fn call_tool(&self, call: ToolCallParams) -> Value {
        let Some(city) = string_argument(call.arguments.as_ref(), "city") else {
            return tool_error("City name is required");
        };

        let payload = match call.name.as_str() {
            "get_weather" => self
                .service
                .current_weather(&city)
                .await
                .map(|weather| json!({ "city": weather.city, "weather": weather.weather })),
            "get_clothing_recommendation" => self.service.advise(&city).await.map(|advice| {
                json!({
                    "city": advice.weather.city,
                    "weather": advice.weather.weather,
                    "clothing_recommendation": advice.clothing,
                })
            }),
            other => return tool_error(&format!("Unknown tool: {other}")),
        };

        match payload {
            Ok(payload) => {
                let text = serde_json::to_string_pretty(&payload).unwrap_or_default();
                json!({ "content": [{ "type": "text", "text": text }], "isError": false })
            }
            Err(e) => tool_error(&format!("Error processing request: {}", e.user_message())),
        }
    }

    async fn get_prompt(&self, get: PromptGetParams) -> std::result::Result<Value, String> {
        if get.name != "weather_advice" {
            return Err(format!("Unknown prompt: {}", get.name));
        }
        let city = string_argument(get.arguments.as_ref(), "city")
            .ok_or_else(|| "City name is required".to_string())?;
        let activity = string_argument(get.arguments.as_ref(), "activity")
            .unwrap_or_else(|| prompts::DEFAULT_ACTIVITY.to_string());

        let advice = self
            .service
            .advise(&city)
            .await
            .map_err(|e| format!("Failed to fetch weather data: {}", e.user_message()))?;

        Ok(json!({
            "description": format!("Weather advice for {activity} in {city}"),
            "messages": [{
                "role": "user",
                "content": {
                    "type": "text",
                    "text": prompts::weather_advice(&city, &activity, &advice),
                },
            }],
        }))
    }
}

fn string_argument(arguments: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    arguments?
        .get(key)?
        .as_str()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn tool_error(message: &str) -> Value {
    json!({ "content": [{ "type": "text", "text": message }], "isError": true })
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {}, "prompts": {} },
        "serverInfo": { "name": SERVER_NAME, "version": VERSION },
    })
}

fn city_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "city": { "type": "string", "description": "Name of the city" }
        },
        "required": ["city"],
    })
}

fn tool_definitions() -> Value {
    json!([
        {
            "name": "get_weather",
            "description": "Get current weather information for a city",
            "inputSchema": city_schema(),
        },
        {
            "name": "get_clothing_recommendation",
            "description": "Get clothing recommendations based on city weather",
            "inputSchema": city_schema(),
        },
    ])
}

fn prompt_definitions() -> Value {
    json!([{
        "name": "weather_advice",
        "description": "Get weather information and activity advice for a city",
        "arguments": [
            { "name": "city", "description": "Name of the city", "required": true },
            {
                "name": "activity",
                "description": "Activity you're planning (e.g., hiking, running, sightseeing)",
                "required": false,
            },
        ],
    }])
}
