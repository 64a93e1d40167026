//! Markdown report: overall summary plus one subsection per log.

use crate::render::ReportFile;
use crate::time::format_timestamp;
use flowlog_core::{decode_nested, EnrichedLog, LogReport, NodeExecution};
use flowlog_error::FlowlogResult;
use serde_json::Value;
use std::collections::BTreeMap;

/// File name of the Markdown report.
pub(crate) const MARKDOWN_FILE: &str = "workflow_logs_report.md";

/// Nested JSON strings decoded, then pretty-printed for a fenced block.
fn pretty_json(value: &Value) -> String {
    let decoded = decode_nested(value.clone());
    serde_json::to_string_pretty(&decoded).unwrap_or_else(|_| decoded.to_string())
}

fn push_json_block(lines: &mut Vec<String>, heading: &str, value: &Value) {
    lines.push(heading.to_string());
    lines.push(String::new());
    lines.push("```json".into());
    lines.push(pretty_json(value));
    lines.push("```".into());
    lines.push(String::new());
}

fn creator(log: &EnrichedLog) -> (String, String) {
    if let Some(account) = &log.record.created_by_account {
        return (
            "账户".into(),
            account.email.clone().unwrap_or_else(|| "N/A".into()),
        );
    }
    if let Some(end_user) = &log.record.created_by_end_user {
        return (
            "终端用户".into(),
            end_user.session_id.clone().unwrap_or_else(|| "N/A".into()),
        );
    }
    ("N/A".into(), "N/A".into())
}

fn push_summary(lines: &mut Vec<String>, report: &LogReport) {
    lines.push("## 📊 整体摘要".into());
    lines.push(String::new());
    lines.push("| 项目 | 值 |".into());
    lines.push("|------|-----|".into());
    lines.push(format!("| 总记录数 | {} |", report.total));
    if let Some(page) = report.page {
        lines.push(format!("| 当前页 | {} |", page));
    }
    if let Some(limit) = report.limit {
        lines.push(format!("| 每页数量 | {} |", limit));
    }
    lines.push(format!("| 当前页记录数 | {} |", report.data.len()));
    lines.push(format!(
        "| 是否有更多 | {} |",
        if report.has_more { "是" } else { "否" }
    ));
    lines.push(String::new());

    if report.data.is_empty() {
        return;
    }

    let mut status_counts: BTreeMap<String, u64> = BTreeMap::new();
    for log in &report.data {
        let status = log
            .record
            .workflow_run
            .as_ref()
            .and_then(|run| run.status.clone())
            .unwrap_or_else(|| "unknown".into());
        *status_counts.entry(status).or_insert(0) += 1;
    }

    lines.push("### 状态统计".into());
    lines.push(String::new());
    lines.push("| 状态 | 数量 |".into());
    lines.push("|------|------|".into());
    for (status, count) in status_counts {
        lines.push(format!("| {} | {} |", status, count));
    }
    lines.push(String::new());
}

fn push_node(lines: &mut Vec<String>, position: usize, node: &NodeExecution) {
    lines.push(format!(
        "##### 节点 {}: {}",
        position,
        node.title.as_deref().unwrap_or("N/A")
    ));
    lines.push(String::new());
    lines.push("| 字段 | 值 |".into());
    lines.push("|------|-----|".into());
    lines.push(format!(
        "| 节点ID | `{}` |",
        node.node_id.as_deref().unwrap_or("N/A")
    ));
    lines.push(format!(
        "| 节点类型 | {} |",
        node.node_type.as_deref().unwrap_or("N/A")
    ));
    lines.push(format!(
        "| 状态 | {} |",
        node.status.as_deref().unwrap_or("N/A")
    ));
    lines.push(format!("| 耗时 | {:.2} 秒 |", node.elapsed_time));
    if let Some(index) = node.index {
        lines.push(format!("| 序号 | {} |", index));
    }
    if let Some(predecessor) = &node.predecessor_node_id {
        lines.push(format!("| 前置节点 | `{}` |", predecessor));
    }
    if let Some(error) = &node.error {
        lines.push(format!("| 错误信息 | {} |", error));
    }
    if node.created_at.is_some() {
        lines.push(format!("| 创建时间 | {} |", format_timestamp(node.created_at)));
    }
    if node.finished_at.is_some() {
        lines.push(format!(
            "| 完成时间 | {} |",
            format_timestamp(node.finished_at)
        ));
    }
    lines.push(String::new());

    if let Some(inputs) = &node.inputs {
        push_json_block(lines, "**输入:**", inputs);
    }
    if let Some(process_data) = &node.process_data {
        push_json_block(lines, "**处理数据:**", process_data);
    }
    if let Some(outputs) = &node.outputs {
        push_json_block(lines, "**输出:**", outputs);
    }
}

fn push_log(lines: &mut Vec<String>, position: usize, log: &EnrichedLog) {
    let run = log.record.workflow_run.as_ref();

    lines.push(format!("### {}. 日志 ID: `{}`", position, log.record.id));
    lines.push(String::new());
    lines.push("#### 基本信息".into());
    lines.push(String::new());
    lines.push("| 字段 | 值 |".into());
    lines.push("|------|-----|".into());
    lines.push(format!("| 日志ID | `{}` |", log.record.id));
    lines.push(format!(
        "| 状态 | {} |",
        run.and_then(|r| r.status.as_deref()).unwrap_or("N/A")
    ));
    lines.push(format!(
        "| 创建时间 | {} |",
        format_timestamp(log.record.created_at)
    ));
    lines.push(format!(
        "| 耗时 | {:.2} 秒 |",
        run.map(|r| r.elapsed_time).unwrap_or(0.0)
    ));
    lines.push(format!(
        "| 来源 | {} |",
        log.record.created_from.as_deref().unwrap_or("N/A")
    ));
    let (creator_type, creator_id) = creator(log);
    lines.push(format!("| 创建者类型 | {} |", creator_type));
    lines.push(format!("| 创建者 | {} |", creator_id));
    lines.push(String::new());

    if let Some(detail) = &log.workflow_run_detail {
        lines.push("#### 工作流运行详情".into());
        lines.push(String::new());
        lines.push("| 字段 | 值 |".into());
        lines.push("|------|-----|".into());
        lines.push(format!(
            "| 运行ID | `{}` |",
            detail.id.as_deref().unwrap_or("N/A")
        ));
        lines.push(format!(
            "| 状态 | {} |",
            detail.status.as_deref().unwrap_or("N/A")
        ));
        lines.push(format!("| 耗时 | {:.2} 秒 |", detail.elapsed_time));
        lines.push(format!("| Token 消耗 | {} |", detail.total_tokens));
        lines.push(format!("| 总步数 | {} |", detail.total_steps));
        lines.push(format!("| 异常数量 | {} |", detail.exceptions_count));
        if let Some(error) = &detail.error {
            lines.push(format!("| 错误信息 | {} |", error));
        }
        if detail.created_at.is_some() {
            lines.push(format!(
                "| 创建时间 | {} |",
                format_timestamp(detail.created_at)
            ));
        }
        if detail.finished_at.is_some() {
            lines.push(format!(
                "| 完成时间 | {} |",
                format_timestamp(detail.finished_at)
            ));
        }
        lines.push(String::new());

        if let Some(inputs) = &detail.inputs {
            push_json_block(lines, "##### 输入参数", inputs);
        }
        if let Some(outputs) = &detail.outputs {
            push_json_block(lines, "##### 输出结果", outputs);
        }
    } else if let Some(error) = &log.workflow_run_detail_error {
        lines.push("#### 工作流运行详情".into());
        lines.push(String::new());
        lines.push(format!("❌ 获取失败: {}", error));
        lines.push(String::new());
    }

    if let Some(nodes) = &log.node_executions {
        if !nodes.is_empty() {
            lines.push("#### 节点执行详情".into());
            lines.push(String::new());
            lines.push(format!("共 {} 个节点", nodes.len()));
            lines.push(String::new());
            for (j, node) in nodes.iter().enumerate() {
                push_node(lines, j + 1, node);
            }
        }
    } else if let Some(error) = &log.node_executions_error {
        lines.push("#### 节点执行详情".into());
        lines.push(String::new());
        lines.push(format!("❌ 获取失败: {}", error));
        lines.push(String::new());
    }

    if let Some(error) = &log.enrichment_error {
        lines.push(format!("⚠️ 详情获取异常: {}", error));
        lines.push(String::new());
    }
}

pub(crate) fn render(report: &LogReport) -> FlowlogResult<Vec<ReportFile>> {
    let mut lines: Vec<String> = Vec::new();

    lines.push("# 工作流执行日志报告".into());
    lines.push(String::new());
    lines.push(format!(
        "生成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    lines.push(String::new());

    push_summary(&mut lines, report);

    lines.push("## 📋 日志详情".into());
    lines.push(String::new());

    let count = report.data.len();
    for (i, log) in report.data.iter().enumerate() {
        push_log(&mut lines, i + 1, log);
        if i + 1 < count {
            lines.push("---".into());
            lines.push(String::new());
        }
    }

    let text = lines.join("\n");
    Ok(vec![ReportFile::new(MARKDOWN_FILE, text.into_bytes())])
}
