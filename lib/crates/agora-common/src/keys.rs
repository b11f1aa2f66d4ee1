//! The configuration variable namespace.
//!
//! Every key the resolver reads or writes is named here so the namespace
//! stays non-overlapping across the three service layers. Values are always
//! strings — booleans and numbers included — to match the env wire format.

// ── Core / mandatory keys ────────────────────────────────────────────────────

/// Stack version identifier, e.g. `v1.7.1`.
pub const AGORA_VERSION: &str = "AGORA_VERSION";
/// Free-text model identifier from the user configuration.
pub const MODEL_NAME: &str = "MODEL_NAME";
/// Authentication token for model downloads.
pub const HUGGINGFACE_TOKEN: &str = "HUGGINGFACE_TOKEN";
/// Installation directory prefix, e.g. `agora`.
pub const INSTALL_FOLDER_PREFIX: &str = "INSTALL_FOLDER_PREFIX";
/// Base installation path, e.g. `/var/apps`.
pub const INSTALL_BASE_PATH: &str = "INSTALL_BASE_PATH";

/// Keys that must be present and non-empty in the base configuration.
/// Resolution fails listing every missing one, so a broken configuration
/// can be fixed in a single pass.
pub const MANDATORY_KEYS: &[&str] = &[
    AGORA_VERSION,
    MODEL_NAME,
    HUGGINGFACE_TOKEN,
    INSTALL_FOLDER_PREFIX,
    INSTALL_BASE_PATH,
];

// ── Derived model keys ───────────────────────────────────────────────────────

/// Resolved model repository path, e.g. `TheBloke/phi-2-GGUF`.
pub const MODEL_REPO: &str = "MODEL_REPO";
/// Human-readable model name derived from the repository path.
pub const MODEL_DISPLAY_NAME: &str = "MODEL_DISPLAY_NAME";
/// Model the inference service loads on startup.
pub const DEFAULT_MODEL: &str = "DEFAULT_MODEL";

// ── Backend service keys ─────────────────────────────────────────────────────

pub const AGORA_API_KEY: &str = "AGORA_API_KEY";
pub const AGORA_API_PORT: &str = "AGORA_API_PORT";
pub const AGORA_SERVER: &str = "AGORA_SERVER";
pub const AGORA_URI: &str = "AGORA_URI";
pub const AGORA_BRANCH: &str = "AGORA_BRANCH";
pub const AGORA_AUTO_UPDATE: &str = "AGORA_AUTO_UPDATE";
pub const AGORA_REQUIRE_API_KEY: &str = "AGORA_REQUIRE_API_KEY";
pub const UVICORN_WORKERS: &str = "UVICORN_WORKERS";
pub const WORKING_DIRECTORY: &str = "WORKING_DIRECTORY";
pub const DATABASE_TYPE: &str = "DATABASE_TYPE";
pub const DATABASE_NAME: &str = "DATABASE_NAME";
pub const LOG_LEVEL: &str = "LOG_LEVEL";
pub const LOG_FORMAT: &str = "LOG_FORMAT";
pub const ALLOWED_DOMAINS: &str = "ALLOWED_DOMAINS";
pub const TZ: &str = "TZ";

// ── Frontend service keys ────────────────────────────────────────────────────

pub const APP_NAME: &str = "APP_NAME";
pub const APP_DESCRIPTION: &str = "APP_DESCRIPTION";
pub const APP_URI: &str = "APP_URI";
pub const AUTH_WEB: &str = "AUTH_WEB";
pub const WEB_PORT: &str = "WEB_PORT";
pub const DEFAULT_AGENT: &str = "DEFAULT_AGENT";
pub const INTERACTIVE_MODE: &str = "INTERACTIVE_MODE";
pub const THEME_NAME: &str = "THEME_NAME";
pub const SHOW_SELECTION: &str = "SHOW_SELECTION";
pub const SHOW_AGENT_BAR: &str = "SHOW_AGENT_BAR";
pub const SHOW_APP_BAR: &str = "SHOW_APP_BAR";
pub const CONVERSATION_MODE: &str = "CONVERSATION_MODE";
pub const FILE_UPLOAD_ENABLED: &str = "FILE_UPLOAD_ENABLED";
pub const VOICE_INPUT_ENABLED: &str = "VOICE_INPUT_ENABLED";
pub const RLHF_ENABLED: &str = "RLHF_ENABLED";
pub const ALLOW_MESSAGE_EDITING: &str = "ALLOW_MESSAGE_EDITING";
pub const ALLOW_MESSAGE_DELETION: &str = "ALLOW_MESSAGE_DELETION";
pub const FOOTER_MESSAGE: &str = "FOOTER_MESSAGE";
pub const AUTH_PROVIDER: &str = "AUTH_PROVIDER";
pub const CREATE_AGENT_ON_REGISTER: &str = "CREATE_AGENT_ON_REGISTER";
pub const ALLOW_EMAIL_SIGN_IN: &str = "ALLOW_EMAIL_SIGN_IN";

// ── Inference service keys ───────────────────────────────────────────────────

pub const INFERENCE_API_KEY: &str = "INFERENCE_API_KEY";
pub const INFERENCE_PORT: &str = "INFERENCE_PORT";
pub const INFERENCE_UI_PORT: &str = "INFERENCE_UI_PORT";
pub const INFERENCE_URI: &str = "INFERENCE_URI";
pub const LLM_MAX_TOKENS: &str = "LLM_MAX_TOKENS";
pub const INFERENCE_MAX_TOKENS: &str = "INFERENCE_MAX_TOKENS";
pub const INFERENCE_TEMPERATURE: &str = "INFERENCE_TEMPERATURE";
pub const INFERENCE_TOP_P: &str = "INFERENCE_TOP_P";
pub const THREADS: &str = "THREADS";
pub const GPU_LAYERS: &str = "GPU_LAYERS";
pub const WHISPER_MODEL: &str = "WHISPER_MODEL";
pub const IMG_ENABLED: &str = "IMG_ENABLED";
pub const AUTO_UPDATE: &str = "AUTO_UPDATE";

// ── Fixed internal addresses ─────────────────────────────────────────────────

/// Backend address on the container network. Not user-overridable: the
/// containers resolve each other by compose service name, so any other
/// value breaks inter-service traffic.
pub const INTERNAL_API_URI: &str = "http://agora-api:7437";
/// Inference address on the container network. Same rule as [`INTERNAL_API_URI`].
pub const INTERNAL_INFERENCE_URI: &str = "http://agora-inference:8091";

// ── Env file section grouping ────────────────────────────────────────────────

/// Section headers for the rendered env file. Cosmetic only — the parser
/// ignores comments, so grouping is not part of the data contract.
pub const ENV_SECTIONS: &[(&str, &[&str])] = &[
    (
        "Core settings",
        &[
            AGORA_VERSION,
            MODEL_NAME,
            MODEL_REPO,
            MODEL_DISPLAY_NAME,
            DEFAULT_MODEL,
            HUGGINGFACE_TOKEN,
            INSTALL_FOLDER_PREFIX,
            INSTALL_BASE_PATH,
        ],
    ),
    (
        "Backend service",
        &[
            AGORA_API_KEY,
            AGORA_API_PORT,
            AGORA_SERVER,
            AGORA_URI,
            AGORA_BRANCH,
            AGORA_AUTO_UPDATE,
            AGORA_REQUIRE_API_KEY,
            UVICORN_WORKERS,
            WORKING_DIRECTORY,
            DATABASE_TYPE,
            DATABASE_NAME,
            LOG_LEVEL,
            LOG_FORMAT,
            ALLOWED_DOMAINS,
            TZ,
        ],
    ),
    (
        "Frontend service",
        &[
            APP_NAME,
            APP_DESCRIPTION,
            APP_URI,
            AUTH_WEB,
            WEB_PORT,
            DEFAULT_AGENT,
            INTERACTIVE_MODE,
            THEME_NAME,
            SHOW_SELECTION,
            SHOW_AGENT_BAR,
            SHOW_APP_BAR,
            CONVERSATION_MODE,
            FILE_UPLOAD_ENABLED,
            VOICE_INPUT_ENABLED,
            RLHF_ENABLED,
            ALLOW_MESSAGE_EDITING,
            ALLOW_MESSAGE_DELETION,
            FOOTER_MESSAGE,
            AUTH_PROVIDER,
            CREATE_AGENT_ON_REGISTER,
            ALLOW_EMAIL_SIGN_IN,
        ],
    ),
    (
        "Inference service",
        &[
            INFERENCE_API_KEY,
            INFERENCE_PORT,
            INFERENCE_UI_PORT,
            INFERENCE_URI,
            LLM_MAX_TOKENS,
            INFERENCE_MAX_TOKENS,
            INFERENCE_TEMPERATURE,
            INFERENCE_TOP_P,
            THREADS,
            GPU_LAYERS,
            WHISPER_MODEL,
            IMG_ENABLED,
            AUTO_UPDATE,
        ],
    ),
];
