//! OpenAPI documentation configuration.

use crate::controllers::health_controller::{HealthResponse, ReadinessResponse};
use fitlog_core::{
    ErrorResponse, Exercise, ExerciseSet, FieldError, UserId, UserRole, Weight, WeightId, WeightUnit, Workout,
    WorkoutId,
};
use fitlog_service::{
    ChangePasswordRequest, ChangeRoleRequest, CreateWeightRequest, CreateWorkoutRequest, DeletedResponse,
    ExerciseInput, LoginRequest, MessageResponse, SetInput, SignupRequest, SignupResponse, TokenResponse,
    UpdateWeightRequest, UpdatedResponse, UserResponse, WeightCreatedResponse, WeightUpdatedResponse,
    WorkoutCreatedResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Fitlog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fitlog API",
        version = "1.0.0",
        description = "Workout and body-weight tracking"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Auth endpoints
        crate::controllers::auth_controller::signup,
        crate::controllers::auth_controller::login,
        crate::controllers::auth_controller::refresh,
        crate::controllers::auth_controller::logout,
        // User endpoints
        crate::controllers::user_controller::search_users,
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::change_password,
        crate::controllers::user_controller::change_role,
        crate::controllers::user_controller::delete_user,
        crate::controllers::user_controller::list_user_workouts,
        // Workout endpoints
        crate::controllers::workout_controller::get_workout,
        crate::controllers::workout_controller::create_workout,
        crate::controllers::workout_controller::delete_workout,
        // Weight endpoints
        crate::controllers::weight_controller::list_weights,
        crate::controllers::weight_controller::get_weight,
        crate::controllers::weight_controller::create_weight,
        crate::controllers::weight_controller::update_weight,
        crate::controllers::weight_controller::delete_weight,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            // Core types
            UserId,
            WorkoutId,
            WeightId,
            UserRole,
            Workout,
            Exercise,
            ExerciseSet,
            Weight,
            WeightUnit,
            ErrorResponse,
            FieldError,
            // Auth DTOs
            SignupRequest,
            SignupResponse,
            LoginRequest,
            TokenResponse,
            MessageResponse,
            // User DTOs
            UserResponse,
            ChangePasswordRequest,
            ChangeRoleRequest,
            UpdatedResponse,
            DeletedResponse,
            // Workout and weight DTOs
            CreateWorkoutRequest,
            ExerciseInput,
            SetInput,
            WorkoutCreatedResponse,
            CreateWeightRequest,
            UpdateWeightRequest,
            WeightCreatedResponse,
            WeightUpdatedResponse,
            // Health
            HealthResponse,
            ReadinessResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Signup, login and token refresh"),
        (name = "users", description = "User management endpoints"),
        (name = "workouts", description = "Workout log endpoints"),
        (name = "weights", description = "Body-weight log endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Security addon for JWT Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /auth/login or /auth/refresh"))
                        .build(),
                ),
            );
        }
    }
}
