//! Diesel schema for module persistence and the project tables it reads.

diesel::table! {
    /// Projects that own modules and issues.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Workspace the project belongs to.
        workspace_id -> Uuid,
        /// Project display name.
        #[max_length = 255]
        name -> Varchar,
    }
}

diesel::table! {
    /// Workspace members referenced by leads, assignments, and audit
    /// columns.
    members (id) {
        /// Member identifier.
        id -> Uuid,
        /// Member display name.
        #[max_length = 255]
        display_name -> Varchar,
        /// Optional avatar URL.
        avatar_url -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Workflow states issues can be in.
    states (id) {
        /// State identifier.
        id -> Uuid,
        /// Project the state belongs to.
        project_id -> Uuid,
        /// State display name.
        #[max_length = 255]
        name -> Varchar,
        /// Workflow group the state belongs to.
        #[max_length = 50]
        state_group -> Varchar,
        /// Display colour.
        #[max_length = 50]
        color -> Varchar,
    }
}

diesel::table! {
    /// Labels attachable to issues.
    labels (id) {
        /// Label identifier.
        id -> Uuid,
        /// Project the label belongs to.
        project_id -> Uuid,
        /// Label display name.
        #[max_length = 255]
        name -> Varchar,
        /// Display colour.
        #[max_length = 50]
        color -> Varchar,
    }
}

diesel::table! {
    /// Issues available for module assignment.
    issues (id) {
        /// Issue identifier.
        id -> Uuid,
        /// Workspace the issue belongs to.
        workspace_id -> Uuid,
        /// Project the issue belongs to.
        project_id -> Uuid,
        /// Issue display name.
        #[max_length = 255]
        name -> Varchar,
        /// Per-project sequence number.
        sequence_id -> Int8,
        /// Optional workflow state.
        state_id -> Nullable<Uuid>,
        /// Optional parent issue for sub-issues.
        parent_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Label attachments per issue.
    issue_labels (id) {
        /// Attachment identifier.
        id -> Uuid,
        /// Labelled issue.
        issue_id -> Uuid,
        /// Attached label.
        label_id -> Uuid,
    }
}

diesel::table! {
    /// Assignee attachments per issue.
    issue_assignees (id) {
        /// Attachment identifier.
        id -> Uuid,
        /// Assigned issue.
        issue_id -> Uuid,
        /// Assigned member.
        assignee_id -> Uuid,
    }
}

diesel::table! {
    /// Module records.
    modules (id) {
        /// Module identifier.
        id -> Uuid,
        /// Workspace the module belongs to.
        workspace_id -> Uuid,
        /// Project the module belongs to.
        project_id -> Uuid,
        /// Module display name, unique within the project.
        #[max_length = 255]
        name -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Optional module lead.
        lead_id -> Nullable<Uuid>,
        /// Optional scheduled start date.
        start_date -> Nullable<Date>,
        /// Optional expected completion date.
        target_date -> Nullable<Date>,
        /// Member that created the module.
        created_by -> Uuid,
        /// Member that last updated the module.
        updated_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Member assignments per module, ordered by position.
    module_members (id) {
        /// Assignment identifier.
        id -> Uuid,
        /// Module the member is assigned to.
        module_id -> Uuid,
        /// Assigned member.
        member_id -> Uuid,
        /// Assignment order within the module.
        position -> Int4,
    }
}

diesel::table! {
    /// Web links attached to modules.
    module_web_links (id) {
        /// Web link identifier.
        id -> Uuid,
        /// Module the link is attached to.
        module_id -> Uuid,
        /// Human-readable link title.
        #[max_length = 255]
        title -> Varchar,
        /// Link destination URL.
        url -> Varchar,
    }
}

diesel::table! {
    /// Links recording which module an issue belongs to.
    module_issues (id) {
        /// Link identifier.
        id -> Uuid,
        /// Workspace the link belongs to.
        workspace_id -> Uuid,
        /// Project the link belongs to.
        project_id -> Uuid,
        /// Module the issue currently belongs to.
        module_id -> Uuid,
        /// Linked issue, unique across all modules.
        issue_id -> Uuid,
        /// Member that created the link.
        created_by -> Uuid,
        /// Member that last moved the link.
        updated_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(issue_labels -> labels (label_id));
diesel::joinable!(issue_labels -> issues (issue_id));
diesel::joinable!(issue_assignees -> members (assignee_id));
diesel::joinable!(issue_assignees -> issues (issue_id));
diesel::joinable!(module_members -> members (member_id));
diesel::joinable!(module_members -> modules (module_id));
diesel::joinable!(module_web_links -> modules (module_id));
diesel::joinable!(module_issues -> modules (module_id));
diesel::joinable!(module_issues -> issues (issue_id));

diesel::allow_tables_to_appear_in_same_query!(
    projects,
    members,
    states,
    labels,
    issues,
    issue_labels,
    issue_assignees,
    modules,
    module_members,
    module_web_links,
    module_issues,
);
