/// End-to-end JSON-RPC conversations with the server
use shamsi_habits::mcp::McpServer;
use shamsi_habits::*;
use serde_json::{json, Value};

#[cfg(test)]
mod server_workflow_tests {
    use super::*;

    struct Session {
        server: McpServer<MemoryGateway>,
        next_id: u64,
    }

    impl Session {
        fn new() -> Self {
            Self {
                server: McpServer::new(HabitStore::open(MemoryGateway::new())),
                next_id: 1,
            }
        }

        async fn request(&mut self, method: &str, params: Value) -> Value {
            let id = self.next_id;
            self.next_id += 1;
            let line = json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params});
            let response = self
                .server
                .process_line(&line.to_string())
                .await
                .expect("request should get a response");
            serde_json::to_value(response).unwrap()
        }

        /// Call a tool and return (is_error, parsed body or raw text)
        async fn tool(&mut self, name: &str, arguments: Value) -> (bool, Value) {
            let response = self
                .request("tools/call", json!({"name": name, "arguments": arguments}))
                .await;
            let result = &response["result"];
            let text = result["content"][0]["text"].as_str().unwrap_or_default();
            let body = serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()));
            (result["isError"] == json!(true), body)
        }
    }

    #[tokio::test]
    async fn test_handshake_and_tool_listing() {
        let mut session = Session::new();

        let init = session.request("initialize", json!({})).await;
        assert_eq!(init["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(init["result"]["capabilities"]["tools"]["listChanged"], false);

        let list = session.request("tools/list", json!({})).await;
        let names: Vec<&str> = list["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|t| t["name"].as_str())
            .collect();
        for expected in [
            "habit_add",
            "habit_update",
            "habit_delete",
            "habit_toggle_today",
            "habit_archive",
            "habit_unarchive",
            "habit_reorder",
            "habit_list",
            "habit_archived",
            "habit_stats",
            "theme_get",
            "theme_set",
        ] {
            assert!(names.contains(&expected), "missing tool {}", expected);
        }

        let add = &list["result"]["tools"][0];
        assert!(add["inputSchema"]["properties"]["name"].is_object());
    }

    #[tokio::test]
    async fn test_full_habit_lifecycle() {
        let mut session = Session::new();

        let (failed, created) = session
            .tool("habit_add", json!({"name": "Read", "color": "rose", "target_days": 10}))
            .await;
        assert!(!failed);
        let read = created["habit_id"].as_str().unwrap().to_string();

        let (_, created) = session.tool("habit_add", json!({"name": "Walk"})).await;
        let walk = created["habit_id"].as_str().unwrap().to_string();

        let (failed, toggled) = session.tool("habit_toggle_today", json!({"habit_id": read})).await;
        assert!(!failed);
        assert_eq!(toggled["completed_today"], true);
        assert_eq!(toggled["current_streak"], 1);
        assert_eq!(toggled["monthly_progress"], 10);

        let (failed, _) = session
            .tool("habit_reorder", json!({"habit_ids": [walk, read]}))
            .await;
        assert!(!failed);

        let (_, listed) = session.tool("habit_list", json!({"include_heatmap": false})).await;
        let habits = listed["habits"].as_array().unwrap();
        assert_eq!(habits[0]["name"], "Walk");
        assert_eq!(habits[1]["name"], "Read");
        assert_eq!(habits[1]["color"], "rose");
        assert_eq!(habits[1]["completedToday"], true);
        assert_eq!(listed["summary"]["activeCount"], 2);
        assert_eq!(listed["summary"]["totalCompletedDays"], 1);

        let (failed, _) = session
            .tool("habit_update", json!({"habit_id": walk, "name": "Evening walk"}))
            .await;
        assert!(!failed);

        let (failed, _) = session.tool("habit_archive", json!({"habit_id": walk})).await;
        assert!(!failed);
        let (_, archived) = session.tool("habit_archived", json!({})).await;
        assert_eq!(archived["habits"][0]["name"], "Evening walk");

        let (_, stats) = session.tool("habit_stats", json!({})).await;
        assert_eq!(stats["stats"]["activeCount"], 1);

        let (failed, _) = session.tool("habit_unarchive", json!({"habit_id": walk})).await;
        assert!(!failed);
        let (failed, _) = session.tool("habit_delete", json!({"habit_id": read})).await;
        assert!(!failed);

        let (_, listed) = session.tool("habit_list", json!({})).await;
        assert_eq!(listed["habits"].as_array().unwrap().len(), 1);
        assert_eq!(listed["habits"][0]["name"], "Evening walk");
    }

    #[tokio::test]
    async fn test_theme_tools() {
        let mut session = Session::new();

        let (_, theme) = session.tool("theme_get", json!({})).await;
        assert_eq!(theme["theme"], "system");

        let (failed, theme) = session.tool("theme_set", json!({"theme": "dark"})).await;
        assert!(!failed);
        assert_eq!(theme["theme"], "dark");

        let (failed, _) = session.tool("theme_set", json!({"theme": "neon"})).await;
        assert!(failed);
    }

    #[tokio::test]
    async fn test_errors_stay_inside_results() {
        let mut session = Session::new();

        let (failed, text) = session
            .tool("habit_toggle_today", json!({"habit_id": "habit-missing"}))
            .await;
        assert!(failed);
        assert!(text.as_str().unwrap().contains("not found"));

        let (failed, _) = session.tool("habit_add", json!({"name": ""})).await;
        assert!(failed);

        let (failed, _) = session
            .tool("habit_add", json!({"name": "Read", "icon": "rocket"}))
            .await;
        assert!(failed);

        let (failed, _) = session.tool("habit_fly", json!({})).await;
        assert!(failed);

        let response = session.request("tools/call", Value::Null).await;
        assert_eq!(response["error"]["code"], -32602);
    }
}
