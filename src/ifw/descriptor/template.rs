//! Descriptor templates (handlebars, HTML escaping doubles as XML escaping).

pub const CONFIG_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Installer>
    <Name>{{name}}</Name>
    <Version>{{version}}</Version>
    <Title>{{title}}</Title>
{{#if publisher}}
    <Publisher>{{publisher}}</Publisher>
{{/if}}
{{#if product_url}}
    <ProductUrl>{{product_url}}</ProductUrl>
{{/if}}
    <StartMenuDir>{{start_menu_dir}}</StartMenuDir>
    <TargetDir>{{target_dir}}</TargetDir>
{{#if admin_target_dir}}
    <AdminTargetDir>{{admin_target_dir}}</AdminTargetDir>
{{/if}}
{{#if remote_repository}}
    <RemoteRepositories>
        <Repository>
            <Url>{{remote_repository}}</Url>
        </Repository>
    </RemoteRepositories>
{{/if}}
</Installer>
"#;

pub const PACKAGE_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Package>
    <DisplayName>{{display_name}}</DisplayName>
    <Description>{{description}}</Description>
    <Version>{{version}}</Version>
    <ReleaseDate>{{release_date}}</ReleaseDate>
    <Name>{{name}}</Name>
{{#if dependencies}}
    <Dependencies>{{dependencies}}</Dependencies>
{{/if}}
{{#if script}}
    <Script>{{script}}</Script>
{{/if}}
{{#if licenses}}
    <Licenses>
{{#each licenses}}
        <License name="{{name}}" file="{{file}}" />
{{/each}}
    </Licenses>
{{/if}}
{{#if sorting_priority}}
    <SortingPriority>{{sorting_priority}}</SortingPriority>
{{/if}}
{{#if default}}
    <Default>{{default}}</Default>
{{/if}}
{{#if is_virtual}}
    <Virtual>true</Virtual>
{{/if}}
{{#if forced_installation}}
    <ForcedInstallation>true</ForcedInstallation>
{{/if}}
</Package>
"#;
