//! Stylesheets injected once by the root component.

pub const THEME_TOKENS: &str = r#"
:root {
    --radius-sm: 4px;
    --radius-md: 8px;
    --radius-lg: 12px;
    --shadow-md: 0 4px 12px rgba(0, 0, 0, 0.25);
    --sidebar-width: 220px;
}

:root[data-theme="dark"] {
    --bg-primary: #0f172a;
    --bg-secondary: #1e293b;
    --text-primary: #f8fafc;
    --text-secondary: #94a3b8;
    --text-muted: #64748b;
    --accent-bg: #3b82f6;
    --accent-bg-hover: #2563eb;
    --accent-text: #ffffff;
    --secondary-accent: #a855f7;
    --border-color: #334155;
    --sidebar-bg: #111827;
    --card-bg: #1e293b;
    --input-bg: #0f172a;
    --hover-bg: rgba(255, 255, 255, 0.08);
    --shared-hop-bg: rgba(59, 130, 246, 0.2);
    --danger-bg: #ef4444;
    --danger-text: #fca5a5;
    --success-bg: #10b981;
    --warning-bg: #f59e0b;
    --warning-text: #fcd34d;
}

:root[data-theme="light"] {
    --bg-primary: #f1f5f9;
    --bg-secondary: #ffffff;
    --text-primary: #0f172a;
    --text-secondary: #475569;
    --text-muted: #64748b;
    --accent-bg: #2563eb;
    --accent-bg-hover: #1d4ed8;
    --accent-text: #ffffff;
    --secondary-accent: #9333ea;
    --border-color: #cbd5e1;
    --sidebar-bg: #ffffff;
    --card-bg: #ffffff;
    --input-bg: #ffffff;
    --hover-bg: rgba(15, 23, 42, 0.08);
    --shared-hop-bg: rgba(37, 99, 235, 0.12);
    --danger-bg: #dc2626;
    --danger-text: #b91c1c;
    --success-bg: #059669;
    --warning-bg: #d97706;
    --warning-text: #92400e;
}

* {
    box-sizing: border-box;
}

body {
    margin: 0;
    padding: 0;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg-primary);
    color: var(--text-primary);
}
"#;

pub const APP_STYLES: &str = r#"
/* Shell */
.app-shell {
    display: flex;
    min-height: 100vh;
}

.sidebar {
    width: var(--sidebar-width);
    flex-shrink: 0;
    display: flex;
    flex-direction: column;
    background: var(--sidebar-bg);
    border-right: 1px solid var(--border-color);
}

.sidebar-title {
    padding: 1rem;
    font-size: 1.125rem;
    font-weight: 600;
    color: var(--accent-bg);
}

.sidebar-nav {
    display: flex;
    flex-direction: column;
    gap: 0.25rem;
    padding: 0 0.5rem;
    flex: 1;
}

.sidebar-link {
    display: block;
    padding: 0.5rem 0.75rem;
    border-radius: var(--radius-md);
    color: var(--text-primary);
    text-decoration: none;
}

.sidebar-link:hover {
    background: var(--hover-bg);
}

.sidebar-link.active {
    background: var(--accent-bg);
    color: var(--accent-text);
}

.sidebar-footer {
    display: flex;
    align-items: center;
    justify-content: space-between;
    gap: 0.5rem;
    padding: 0.75rem;
    border-top: 1px solid var(--border-color);
}

.main-content {
    flex: 1;
    min-width: 0;
    padding: 1.5rem;
}

.page-title {
    margin: 0 0 1rem;
    font-size: 1.5rem;
}

/* Buttons */
.btn {
    padding: 0.5rem 1rem;
    border-radius: var(--radius-md);
    border: 1px solid var(--border-color);
    background: var(--bg-secondary);
    color: var(--text-primary);
    cursor: pointer;
    font-size: 0.875rem;
}

.btn:hover:not(:disabled) {
    background: var(--hover-bg);
}

.btn:disabled {
    opacity: 0.5;
    cursor: not-allowed;
}

.btn-primary {
    background: var(--accent-bg);
    border-color: var(--accent-bg);
    color: var(--accent-text);
}

.btn-primary:hover:not(:disabled) {
    background: var(--accent-bg-hover);
}

.btn-icon {
    width: 32px;
    height: 32px;
    padding: 0;
    display: inline-flex;
    align-items: center;
    justify-content: center;
}

/* Trace sections */
.section-list {
    display: flex;
    flex-wrap: wrap;
    gap: 1rem;
}

.trace-section {
    flex: 1 1 420px;
    min-width: 0;
    background: var(--card-bg);
    border: 1px solid var(--border-color);
    border-radius: var(--radius-lg);
    padding: 1rem;
}

.trace-section-header {
    display: flex;
    align-items: center;
    justify-content: space-between;
    margin-bottom: 0.75rem;
    font-weight: 600;
}

.endpoint-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
    gap: 0.75rem;
}

.endpoint-heading {
    font-size: 0.8rem;
    font-weight: 600;
    text-transform: uppercase;
    color: var(--accent-bg);
    margin-bottom: 0.25rem;
}

.endpoint-heading.destination {
    color: var(--secondary-accent);
}

.field {
    display: flex;
    flex-direction: column;
    gap: 0.25rem;
    margin-bottom: 0.5rem;
}

.field label {
    font-size: 0.75rem;
    color: var(--text-secondary);
}

.field-input {
    display: flex;
    align-items: center;
    gap: 0.25rem;
}

.field input {
    flex: 1;
    min-width: 0;
    padding: 0.5rem 0.75rem;
    background: var(--input-bg);
    color: var(--text-primary);
    border: 1px solid var(--border-color);
    border-radius: var(--radius-md);
    font-size: 0.875rem;
    outline: none;
}

.field input.invalid {
    border-color: var(--danger-bg);
}

.field-hint {
    font-size: 0.7rem;
    color: var(--danger-text);
}

.gateway-badge {
    font-size: 0.9rem;
    width: 1.25rem;
    text-align: center;
}

.gateway-badge.succeeded { color: var(--success-bg); }
.gateway-badge.failed { color: var(--danger-bg); }
.gateway-badge.manual { color: var(--text-secondary); }

.section-actions {
    display: flex;
    justify-content: flex-end;
    margin-top: 0.5rem;
}

.page-actions {
    display: flex;
    justify-content: center;
    gap: 0.5rem;
    margin-top: 1.5rem;
}

/* Messages */
.message {
    padding: 0.75rem 1rem;
    border-radius: var(--radius-md);
    margin: 0.5rem 0;
    font-size: 0.875rem;
    border: 1px solid;
}

.message-title {
    font-weight: 600;
    margin-bottom: 0.25rem;
}

.message.error {
    border-color: var(--danger-bg);
    color: var(--danger-text);
}

.message.warning {
    border-color: var(--warning-bg);
    color: var(--warning-text);
}

.message.info {
    border-color: var(--border-color);
    color: var(--text-secondary);
}

.spinner {
    display: flex;
    flex-direction: column;
    align-items: center;
    gap: 0.5rem;
    padding: 2rem 1rem;
    color: var(--text-secondary);
}

.spinner-ring {
    width: 28px;
    height: 28px;
    border: 3px solid var(--border-color);
    border-top-color: var(--accent-bg);
    border-radius: 50%;
    animation: spin 0.8s linear infinite;
}

@keyframes spin {
    to { transform: rotate(360deg); }
}

/* Hops */
.hop-chain {
    display: flex;
    flex-direction: column;
    gap: 0.25rem;
    margin-top: 0.5rem;
}

.hop-chain-title {
    font-size: 0.8rem;
    font-weight: 600;
    color: var(--text-secondary);
    margin: 0.75rem 0 0.25rem;
}

.hop {
    display: flex;
    align-items: flex-start;
    gap: 0.5rem;
    padding: 0.4rem 0.6rem;
    border-radius: var(--radius-sm);
    border: 1px solid transparent;
    cursor: pointer;
}

.hop:hover {
    background: var(--hover-bg);
}

.hop.shared {
    background: var(--shared-hop-bg);
    border-color: var(--accent-bg);
}

.hop-index {
    min-width: 1.5rem;
    font-size: 0.75rem;
    color: var(--text-muted);
}

.hop-name {
    font-weight: 500;
}

.hop-secondary {
    font-size: 0.75rem;
    color: var(--text-secondary);
}

.hop-details {
    display: grid;
    grid-template-columns: auto 1fr;
    column-gap: 0.75rem;
    font-size: 0.75rem;
    margin-top: 0.25rem;
    color: var(--text-secondary);
}

.empty-state {
    padding: 1rem;
    text-align: center;
    font-style: italic;
    color: var(--text-muted);
}

/* History */
.history-list {
    display: flex;
    flex-direction: column;
    border: 1px solid var(--border-color);
    border-radius: var(--radius-lg);
    background: var(--card-bg);
}

.history-list-header {
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 0.75rem 1rem;
    border-bottom: 1px solid var(--border-color);
}

.history-item {
    border-bottom: 1px solid var(--border-color);
}

.history-item:last-child {
    border-bottom: none;
}

.history-item-summary {
    display: flex;
    align-items: flex-start;
    justify-content: space-between;
    gap: 0.5rem;
    padding: 0.75rem 1rem;
    cursor: pointer;
}

.history-item-summary:hover {
    background: var(--hover-bg);
}

.chip {
    display: inline-block;
    padding: 0.05rem 0.4rem;
    margin-right: 0.25rem;
    border-radius: var(--radius-sm);
    border: 1px solid var(--accent-bg);
    color: var(--accent-bg);
    font-size: 0.7rem;
}

.chip.destination {
    border-color: var(--secondary-accent);
    color: var(--secondary-accent);
}

.history-meta {
    display: flex;
    flex-direction: column;
    font-size: 0.75rem;
    color: var(--text-secondary);
}

.history-item-body {
    padding: 0 1rem 1rem;
}

.kv-table {
    display: grid;
    grid-template-columns: auto 1fr;
    column-gap: 1rem;
    font-size: 0.8rem;
}

.raw-text {
    white-space: pre-wrap;
    word-break: break-all;
    font-family: monospace;
    font-size: 0.75rem;
    padding: 0.5rem;
    background: var(--bg-primary);
    border-radius: var(--radius-sm);
}

/* Comparison */
.comparison-options {
    max-height: 280px;
    overflow-y: auto;
    border: 1px solid var(--border-color);
    border-radius: var(--radius-md);
    background: var(--card-bg);
}

.comparison-option {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    padding: 0.5rem 0.75rem;
    cursor: pointer;
}

.comparison-option:hover {
    background: var(--hover-bg);
}

/* Login */
.login-page {
    min-height: 100vh;
    display: flex;
    align-items: center;
    justify-content: center;
}

.login-card {
    width: 100%;
    max-width: 360px;
    padding: 2rem;
    background: var(--card-bg);
    border: 1px solid var(--border-color);
    border-radius: var(--radius-lg);
    box-shadow: var(--shadow-md);
}

@media (max-width: 768px) {
    .app-shell {
        flex-direction: column;
    }

    .sidebar {
        width: 100%;
        border-right: none;
        border-bottom: 1px solid var(--border-color);
    }

    .sidebar-nav {
        flex-direction: row;
        flex-wrap: wrap;
    }
}
"#;
