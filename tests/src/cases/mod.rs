cases! {
    simple,
    gelf_extra,
    zerolog_line,
    raw_extra,
    pipeline_order,
    caller_pipeline,
    invalid_json,
    invalid_type
}
