//! Domain enums and the table catalogue.
//!
//! Enum columns are stored as text; `as_str` gives the exact spelling the
//! schema's `CHECK` constraints accept.

/// The application tables, in the order they are listed and inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    UserGoals,
    UserSettings,
    MealTypes,
    Products,
    FoodDiary,
    WeightHistory,
    DailySummary,
    UserSessions,
    PasswordResetTokens,
    ActivityLog,
}

impl Table {
    pub const ALL: [Table; 11] = [
        Table::Users,
        Table::UserGoals,
        Table::UserSettings,
        Table::MealTypes,
        Table::Products,
        Table::FoodDiary,
        Table::WeightHistory,
        Table::DailySummary,
        Table::UserSessions,
        Table::PasswordResetTokens,
        Table::ActivityLog,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::UserGoals => "user_goals",
            Table::UserSettings => "user_settings",
            Table::MealTypes => "meal_types",
            Table::Products => "products",
            Table::FoodDiary => "food_diary",
            Table::WeightHistory => "weight_history",
            Table::DailySummary => "daily_summary",
            Table::UserSessions => "user_sessions",
            Table::PasswordResetTokens => "password_reset_tokens",
            Table::ActivityLog => "activity_log",
        }
    }

    /// Comma separated list of every table, for statements that name them all.
    pub fn all_names() -> String {
        Self::ALL
            .iter()
            .map(Table::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "SEDENTARY",
            ActivityLevel::LightlyActive => "LIGHTLY_ACTIVE",
            ActivityLevel::ModeratelyActive => "MODERATELY_ACTIVE",
            ActivityLevel::VeryActive => "VERY_ACTIVE",
            ActivityLevel::ExtraActive => "EXTRA_ACTIVE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalType {
    WeightLoss,
    WeightGain,
    Maintenance,
}

impl GoalType {
    pub const ALL: [GoalType; 3] = [
        GoalType::WeightLoss,
        GoalType::WeightGain,
        GoalType::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::WeightLoss => "WEIGHT_LOSS",
            GoalType::WeightGain => "WEIGHT_GAIN",
            GoalType::Maintenance => "MAINTENANCE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Uk,
    En,
    Ru,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Uk, Language::En, Language::Ru];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Uk => "uk",
            Language::En => "en",
            Language::Ru => "ru",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
    Auto,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Auto];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "LIGHT",
            Theme::Dark => "DARK",
            Theme::Auto => "AUTO",
        }
    }
}

/// The four canonical meals. `display_order` is the ordering the apps show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealKind {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealKind {
    pub const ALL: [MealKind; 4] = [
        MealKind::Breakfast,
        MealKind::Lunch,
        MealKind::Dinner,
        MealKind::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealKind::Breakfast => "BREAKFAST",
            MealKind::Lunch => "LUNCH",
            MealKind::Dinner => "DINNER",
            MealKind::Snack => "SNACK",
        }
    }

    pub fn display_order(&self) -> i32 {
        match self {
            MealKind::Breakfast => 1,
            MealKind::Lunch => 2,
            MealKind::Dinner => 3,
            MealKind::Snack => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductCategory {
    Vegetables,
    Fruits,
    Meat,
    Fish,
    Dairy,
    Grains,
    Snacks,
    Beverages,
    Other,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 9] = [
        ProductCategory::Vegetables,
        ProductCategory::Fruits,
        ProductCategory::Meat,
        ProductCategory::Fish,
        ProductCategory::Dairy,
        ProductCategory::Grains,
        ProductCategory::Snacks,
        ProductCategory::Beverages,
        ProductCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Vegetables => "VEGETABLES",
            ProductCategory::Fruits => "FRUITS",
            ProductCategory::Meat => "MEAT",
            ProductCategory::Fish => "FISH",
            ProductCategory::Dairy => "DAIRY",
            ProductCategory::Grains => "GRAINS",
            ProductCategory::Snacks => "SNACKS",
            ProductCategory::Beverages => "BEVERAGES",
            ProductCategory::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    UserLogin,
    UserLogout,
    FoodAdded,
    WeightUpdated,
    GoalUpdated,
    ProfileUpdated,
}

impl ActionType {
    pub const ALL: [ActionType; 6] = [
        ActionType::UserLogin,
        ActionType::UserLogout,
        ActionType::FoodAdded,
        ActionType::WeightUpdated,
        ActionType::GoalUpdated,
        ActionType::ProfileUpdated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::UserLogin => "USER_LOGIN",
            ActionType::UserLogout => "USER_LOGOUT",
            ActionType::FoodAdded => "FOOD_ADDED",
            ActionType::WeightUpdated => "WEIGHT_UPDATED",
            ActionType::GoalUpdated => "GOAL_UPDATED",
            ActionType::ProfileUpdated => "PROFILE_UPDATED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStatus {
    Success,
    Failure,
    Warning,
}

impl LogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogStatus::Success => "SUCCESS",
            LogStatus::Failure => "FAILURE",
            LogStatus::Warning => "WARNING",
        }
    }
}
