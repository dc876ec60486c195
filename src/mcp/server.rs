//! BioSync MCP Server Implementation
//!
//! Implements the MCP server with all BioSync tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::Database;
use crate::health::{ActivityLevel, BodyMeasurements};
use crate::models::{IntakeKind, RegistrationInput};
use crate::tools::dashboard;
use crate::tools::profiles;
use crate::tools::status::StatusTracker;

/// BioSync MCP Service
#[derive(Clone)]
pub struct BioSyncService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<BioSyncService>,
}

impl BioSyncService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct MeasurementParams {
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Age in whole years
    pub age: i32,
    /// "male" or "female" (case-insensitive); other values get no BMR adjustment
    pub sex: String,
    /// Sedentary, Light, Moderate or Active (any case); unknown levels use the Sedentary multiplier
    pub activity_level: String,
}

impl From<MeasurementParams> for BodyMeasurements {
    fn from(p: MeasurementParams) -> Self {
        BodyMeasurements {
            weight_kg: p.weight_kg,
            height_cm: p.height_cm,
            age: p.age,
            sex: p.sex,
            activity_level: ActivityLevel::normalize(&p.activity_level),
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RegisterProfileParams {
    /// Account uid issued by the authentication provider
    pub uid: String,
    pub full_name: String,
    pub email: String,
    pub age: i32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub sex: String,
    pub activity_level: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UidParams {
    /// Account uid
    pub uid: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListProfilesParams {
    /// Maximum results (default 50, max 200)
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    /// Offset for pagination (default 0)
    #[serde(default)]
    pub offset: i64,
}

fn default_list_limit() -> i64 { 50 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddWaterParams {
    /// Account uid
    pub uid: String,
    /// Milliliters to add (negative to correct a mistake; default 250)
    #[serde(default = "default_water_amount")]
    pub amount_ml: i64,
}

fn default_water_amount() -> i64 { 250 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddCaloriesParams {
    /// Account uid
    pub uid: String,
    /// Calories to add (negative to correct a mistake)
    pub amount: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateMeasurementsParams {
    /// Account uid
    pub uid: String,
    #[serde(flatten)]
    pub measurements: MeasurementParams,
}

fn not_found(uid: &str) -> String {
    serde_json::json!({ "error": "Profile not found", "uid": uid }).to_string()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl BioSyncService {
    // --- Status ---

    #[tool(description = "Get the current status of the BioSync service including build info, database status, and process information")]
    async fn biosync_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = to_json(&status)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for registering users and tracking daily water and calorie intake. Call this before using the profile tools.")]
    fn profile_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::PROFILE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(PROFILE_INSTRUCTIONS)]))
    }

    // --- Calculator ---

    #[tool(description = "Calculate BMI, BMI category, BMR, daily calorie goal and daily water goal from body measurements without storing anything")]
    fn calculate_metrics(&self, Parameters(p): Parameters<MeasurementParams>) -> Result<CallToolResult, McpError> {
        let result = profiles::calculate_metrics(&p.into());
        let json = to_json(&result)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Profiles ---

    #[tool(description = "Register a user profile. Validates the form, derives BMI and daily goals, and stores them. Validation failures are listed in 'errors'.")]
    fn register_profile(&self, Parameters(p): Parameters<RegisterProfileParams>) -> Result<CallToolResult, McpError> {
        let input = RegistrationInput {
            full_name: p.full_name, email: p.email, age: p.age, weight_kg: p.weight_kg,
            height_cm: p.height_cm, sex: p.sex,
            activity_level: ActivityLevel::normalize(&p.activity_level),
        };
        let result = profiles::register_profile(&self.database, &p.uid, input)
            .map_err(|e| McpError::invalid_params(e, None))?;
        let json = to_json(&result)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get a stored user profile with measurements, goals and current intake")]
    fn get_profile(&self, Parameters(p): Parameters<UidParams>) -> Result<CallToolResult, McpError> {
        let result = profiles::get_profile(&self.database, &p.uid).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(profile) => to_json(&profile)?,
            None => not_found(&p.uid),
        };
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List user profiles with goals and progress, with pagination")]
    fn list_profiles(&self, Parameters(p): Parameters<ListProfilesParams>) -> Result<CallToolResult, McpError> {
        let result = profiles::list_profiles(&self.database, p.limit, p.offset)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = to_json(&result)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Replace a user's weight, height, age, sex and activity level, and recalculate all goals")]
    fn update_measurements(&self, Parameters(p): Parameters<UpdateMeasurementsParams>) -> Result<CallToolResult, McpError> {
        let result = profiles::update_measurements(&self.database, &p.uid, p.measurements.into())
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(resp) => to_json(&resp)?,
            None => not_found(&p.uid),
        };
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Delete a user profile")]
    fn delete_profile(&self, Parameters(p): Parameters<UidParams>) -> Result<CallToolResult, McpError> {
        let result = profiles::delete_profile(&self.database, &p.uid)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = to_json(&result)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Dashboard ---

    #[tool(description = "Get the home-screen dashboard for a user: first name, date, calorie goal, activity badge, BMI and category, weight, height, and water/calorie progress")]
    fn get_dashboard(&self, Parameters(p): Parameters<UidParams>) -> Result<CallToolResult, McpError> {
        let result = dashboard::get_dashboard(&self.database, &p.uid)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(dash) => to_json(&dash)?,
            None => not_found(&p.uid),
        };
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Intake ---

    #[tool(description = "Add water to today's intake in milliliters (default 250). Negative amounts subtract; intake never drops below 0.")]
    fn add_water(&self, Parameters(p): Parameters<AddWaterParams>) -> Result<CallToolResult, McpError> {
        self.adjust(&p.uid, IntakeKind::Water, p.amount_ml)
    }

    #[tool(description = "Add calories to today's intake. Negative amounts subtract; intake never drops below 0.")]
    fn add_calories(&self, Parameters(p): Parameters<AddCaloriesParams>) -> Result<CallToolResult, McpError> {
        self.adjust(&p.uid, IntakeKind::Calories, p.amount)
    }

    #[tool(description = "Reset today's water and calorie intake to 0")]
    fn reset_daily_intake(&self, Parameters(p): Parameters<UidParams>) -> Result<CallToolResult, McpError> {
        let result = profiles::reset_daily_intake(&self.database, &p.uid)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(resp) => to_json(&resp)?,
            None => not_found(&p.uid),
        };
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

impl BioSyncService {
    fn adjust(&self, uid: &str, kind: IntakeKind, amount: i64) -> Result<CallToolResult, McpError> {
        let result = profiles::adjust_intake(&self.database, uid, kind, amount)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(resp) => to_json(&resp)?,
            None => not_found(uid),
        };
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for BioSyncService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "biosync".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("BioSync".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "BioSync - daily wellness tracking: BMI, calorie and water goals. \
                 IMPORTANT: Call profile_instructions before registering users. \
                 Calculator: calculate_metrics. \
                 Profiles: register_profile/get_profile/list_profiles/update_measurements/delete_profile. \
                 Dashboard: get_dashboard. \
                 Intake: add_water/add_calories/reset_daily_intake."
                    .into(),
            ),
        }
    }
}
