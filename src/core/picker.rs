use crate::domain::model::Payload;

/// 只保留 `allowed` 中列出的頂層欄位，順序依照 `input`
///
/// 不存在的欄位直接略過，巢狀內容原樣保留。
pub fn pick(input: &Payload, allowed: &[&str]) -> Payload {
    input
        .iter()
        .filter(|(key, _)| allowed.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
