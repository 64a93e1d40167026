//! CSV report files with the fixed Chinese headers.

use crate::render::ReportFile;
use crate::tables::ReportTables;
use flowlog_core::LogReport;
use flowlog_error::{FlowlogResult, ReportError, ReportErrorKind};

/// File names of the four CSV reports.
pub(crate) const OVERVIEW_FILE: &str = "问答类应用数-总览.csv";
pub(crate) const DAILY_FILE: &str = "问答类应用数-每日消息数.csv";
pub(crate) const USERS_FILE: &str = "问答类应用数-用户列表.csv";
pub(crate) const QA_FILE: &str = "问答类应用数-用户问答对.csv";

/// Spreadsheet apps detect UTF-8 from a leading BOM.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const QA_NOTE: &str = "注：此处区分是否可上传附件、是否引用RAG知识库，若无内容，为空即可。";

fn write_rows(rows: &[Vec<String>]) -> FlowlogResult<Vec<u8>> {
    let mut buf = Vec::new();
    buf.extend_from_slice(UTF8_BOM);

    let mut writer = csv::Writer::from_writer(buf);
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| ReportError::new(ReportErrorKind::Csv(e.to_string())))?;
    }
    writer
        .into_inner()
        .map_err(|e| ReportError::new(ReportErrorKind::Csv(e.to_string())).into())
}

fn overview_rows(tables: &ReportTables) -> Vec<Vec<String>> {
    let overview = &tables.overview;
    vec![
        vec![
            "开始日期".into(),
            "结束日期".into(),
            "全部消息数".into(),
            "用户数".into(),
            "全部会话数".into(),
            "平均会话互动数".into(),
            "Token输出速度".into(),
            "用户满意度".into(),
            "费用消耗".into(),
        ],
        vec![
            overview.start_date.clone(),
            overview.end_date.clone(),
            overview.total_messages.to_string(),
            overview.total_users.to_string(),
            overview.total_sessions.to_string(),
            format!("{:.2}", overview.avg_session_interactions),
            format!("{:.2} tokens/秒", overview.token_throughput),
            overview.satisfaction.clone(),
            format!("{:.6}", overview.total_cost),
        ],
    ]
}

fn daily_rows(tables: &ReportTables) -> Vec<Vec<String>> {
    let mut rows = vec![vec!["日期".into(), "消息数量".into()]];
    for day in &tables.daily {
        rows.push(vec![
            day.date.format("%Y-%m-%d").to_string(),
            day.count.to_string(),
        ]);
    }
    rows
}

fn user_rows(tables: &ReportTables) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "用户ID".into(),
        "消息数".into(),
        "使用天数".into(),
        "首次使用日期".into(),
        "最后使用日期".into(),
    ]];
    for user in &tables.users {
        rows.push(vec![
            user.user_id.clone(),
            user.message_count.to_string(),
            user.active_days.to_string(),
            user.first_seen.clone(),
            user.last_seen.clone(),
        ]);
    }
    rows
}

fn qa_rows(tables: &ReportTables) -> Vec<Vec<String>> {
    let width = tables.qa.segment_columns;
    // Fixed columns before and after the dynamic segment block.
    let arity = 10 + width;

    let blank = vec![String::new(); arity];

    let mut header: Vec<String> = vec![
        "序号".into(),
        "用户id".into(),
        "会话id".into(),
        "问题排序（同一个会话ID，提问先后顺序）".into(),
        "用户提问".into(),
        "附件名称：名称.后缀".into(),
        "AI回答".into(),
        "知识库名称".into(),
        "引用的文档名称".into(),
    ];
    for n in 1..=width {
        header.push(format!("文本片段内容{}（相似度+文本内容）", n));
    }
    header.push("创建时间".into());

    let mut rows = vec![blank.clone(), header, blank.clone()];

    for row in &tables.qa.rows {
        let mut record: Vec<String> = vec![
            row.sequence.to_string(),
            row.user_id.clone(),
            row.session_id.clone(),
            row.question_order.to_string(),
            row.query.clone(),
            row.attachments.clone(),
            row.answer.clone(),
            row.dataset_name.clone(),
            row.document_name.clone(),
        ];
        for n in 0..width {
            record.push(row.segments.get(n).cloned().unwrap_or_default());
        }
        record.push(row.created_at.clone());
        rows.push(record);
    }

    let mut note = vec![String::new(); arity];
    note[0] = QA_NOTE.into();
    rows.push(blank.clone());
    rows.push(note);
    rows.push(blank);

    rows
}

pub(crate) fn render(report: &LogReport) -> FlowlogResult<Vec<ReportFile>> {
    let tables = ReportTables::build(report);

    Ok(vec![
        ReportFile::new(OVERVIEW_FILE, write_rows(&overview_rows(&tables))?),
        ReportFile::new(DAILY_FILE, write_rows(&daily_rows(&tables))?),
        ReportFile::new(USERS_FILE, write_rows(&user_rows(&tables))?),
        ReportFile::new(QA_FILE, write_rows(&qa_rows(&tables))?),
    ])
}
