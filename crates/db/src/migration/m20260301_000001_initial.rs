//! Initial database migration.
//!
//! Creates the workflow engine tables, the business entities its
//! executors mutate, and the notification log.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: WORKFLOW DEFINITIONS (chain templates)
        // ============================================================
        db.execute_unprepared(WORKFLOW_DEFINITIONS_SQL).await?;
        db.execute_unprepared(WORKFLOW_DEFINITION_STEPS_SQL).await?;

        // ============================================================
        // PART 3: WORKFLOW INSTANCES
        // ============================================================
        db.execute_unprepared(WORKFLOWS_SQL).await?;
        db.execute_unprepared(WORKFLOW_STEPS_SQL).await?;
        db.execute_unprepared(APPROVALS_SQL).await?;
        db.execute_unprepared(WORKFLOW_REQUESTS_SQL).await?;

        // ============================================================
        // PART 4: BUSINESS ENTITIES
        // ============================================================
        db.execute_unprepared(INVENTORY_ITEMS_SQL).await?;
        db.execute_unprepared(LEAVE_REQUESTS_SQL).await?;
        db.execute_unprepared(EXPENSE_CLAIMS_SQL).await?;

        // ============================================================
        // PART 5: NOTIFICATIONS
        // ============================================================
        db.execute_unprepared(NOTIFICATIONS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE workflow_status AS ENUM ('active', 'completed', 'rejected');
CREATE TYPE approval_status AS ENUM ('pending', 'approved', 'rejected');
CREATE TYPE request_status AS ENUM ('pending', 'completed', 'failed', 'rejected');
CREATE TYPE workflow_module AS ENUM ('inventory', 'hr', 'finance');
CREATE TYPE workflow_action AS ENUM ('create', 'update', 'delete', 'leave_request', 'expense_claim');
CREATE TYPE entity_status AS ENUM ('pending', 'approved', 'rejected');
";

const WORKFLOW_DEFINITIONS_SQL: &str = r"
CREATE TABLE workflow_definitions (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    module workflow_module NOT NULL,
    action workflow_action NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE UNIQUE INDEX idx_workflow_definitions_triple
    ON workflow_definitions (tenant_id, module, action)
    WHERE is_active;
CREATE INDEX idx_workflow_definitions_tenant ON workflow_definitions (tenant_id);
";

const WORKFLOW_DEFINITION_STEPS_SQL: &str = r"
CREATE TABLE workflow_definition_steps (
    id UUID PRIMARY KEY,
    definition_id UUID NOT NULL REFERENCES workflow_definitions (id),
    step_order INTEGER NOT NULL CHECK (step_order >= 1),
    required_permission TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (definition_id, step_order)
);
";

const WORKFLOWS_SQL: &str = r"
CREATE TABLE workflows (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    module workflow_module NOT NULL,
    action workflow_action NOT NULL,
    status workflow_status NOT NULL DEFAULT 'active',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_workflows_tenant_status ON workflows (tenant_id, status);
";

const WORKFLOW_STEPS_SQL: &str = r"
CREATE TABLE workflow_steps (
    id UUID PRIMARY KEY,
    workflow_id UUID NOT NULL REFERENCES workflows (id),
    step_order INTEGER NOT NULL CHECK (step_order >= 1),
    required_permission TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (workflow_id, step_order)
);
";

const APPROVALS_SQL: &str = r"
CREATE TABLE approvals (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    workflow_id UUID NOT NULL REFERENCES workflows (id),
    workflow_step_id UUID NOT NULL UNIQUE REFERENCES workflow_steps (id),
    step_order INTEGER NOT NULL,
    required_permission TEXT NOT NULL,
    status approval_status NOT NULL DEFAULT 'pending',
    approved_by UUID,
    approved_at TIMESTAMPTZ,
    comment TEXT,
    rejection_reason TEXT,
    data JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_approvals_tenant_status ON approvals (tenant_id, status);
CREATE INDEX idx_approvals_workflow ON approvals (workflow_id);
";

const WORKFLOW_REQUESTS_SQL: &str = r"
CREATE TABLE workflow_requests (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    workflow_id UUID NOT NULL UNIQUE REFERENCES workflows (id),
    module workflow_module NOT NULL,
    action workflow_action NOT NULL,
    status request_status NOT NULL DEFAULT 'pending',
    created_by UUID NOT NULL,
    payload JSONB NOT NULL,
    warning TEXT,
    failure_reason TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_workflow_requests_tenant_creator
    ON workflow_requests (tenant_id, created_by);
";

const INVENTORY_ITEMS_SQL: &str = r"
CREATE TABLE inventory_items (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    sku TEXT NOT NULL,
    name TEXT NOT NULL,
    price NUMERIC(19, 4) NOT NULL CHECK (price >= 0),
    quantity INTEGER NOT NULL CHECK (quantity >= 0),
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (tenant_id, sku)
);
";

const LEAVE_REQUESTS_SQL: &str = r"
CREATE TABLE leave_requests (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    employee_id UUID NOT NULL,
    leave_type TEXT NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    status entity_status NOT NULL DEFAULT 'pending',
    reason TEXT,
    rejection_reason TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_leave_requests_tenant_employee
    ON leave_requests (tenant_id, employee_id);
";

const EXPENSE_CLAIMS_SQL: &str = r"
CREATE TABLE expense_claims (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    employee_id UUID NOT NULL,
    amount NUMERIC(19, 4) NOT NULL CHECK (amount >= 0),
    currency CHAR(3) NOT NULL DEFAULT 'USD',
    description TEXT NOT NULL,
    status entity_status NOT NULL DEFAULT 'pending',
    rejection_reason TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_expense_claims_tenant_employee
    ON expense_claims (tenant_id, employee_id);
";

const NOTIFICATIONS_SQL: &str = r"
CREATE TABLE notifications (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    employee_id UUID NOT NULL,
    notification_type TEXT NOT NULL,
    title TEXT NOT NULL,
    message TEXT NOT NULL,
    is_read BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_notifications_tenant_employee
    ON notifications (tenant_id, employee_id);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS notifications;
DROP TABLE IF EXISTS expense_claims;
DROP TABLE IF EXISTS leave_requests;
DROP TABLE IF EXISTS inventory_items;
DROP TABLE IF EXISTS workflow_requests;
DROP TABLE IF EXISTS approvals;
DROP TABLE IF EXISTS workflow_steps;
DROP TABLE IF EXISTS workflows;
DROP TABLE IF EXISTS workflow_definition_steps;
DROP TABLE IF EXISTS workflow_definitions;
DROP TYPE IF EXISTS entity_status;
DROP TYPE IF EXISTS workflow_action;
DROP TYPE IF EXISTS workflow_module;
DROP TYPE IF EXISTS request_status;
DROP TYPE IF EXISTS approval_status;
DROP TYPE IF EXISTS workflow_status;
";
